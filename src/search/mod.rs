//! Search module - scan, scope, combine, cache, render / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - Search module only exposes primitive operations, the HTTP layer drives the flow
//! - Query flow: engine scan → scope filter → session cache (combine + store) → token list
//! - Hit flow: passage decode → text source → highlighted fragment
//!
//! Search features / 搜索特性：
//! - Literal substring matching, case-sensitive or case-folded
//! - Plain text or raw USFM content
//! - Hit lists combined across queries (load / add / remove / intersect)

pub mod combine;
pub mod engine;
pub mod highlight;
pub mod matcher;
pub mod schema;
pub mod scope;
pub mod session;

pub use combine::{combine, CombineMode};
pub use engine::SearchEngine;
pub use highlight::{format_hit, HitError};
pub use schema::{QueryParams, SearchQuery, SessionState};
pub use scope::Scope;
pub use session::{SessionCache, SessionCacheConfig, SessionStats};
