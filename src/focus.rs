//! Current focus - the book last opened by the user / 当前焦点书卷

use std::sync::atomic::{AtomicI32, Ordering};

/// Source of the "current book" used by book-scoped searches / 焦点提供者
pub trait FocusTracker: Send + Sync {
    fn book(&self) -> i32;
    fn set_book(&self, book: i32);
}

/// In-process focus, starts at Genesis / 进程内焦点
pub struct SharedFocus {
    book: AtomicI32,
}

impl SharedFocus {
    pub fn new(book: i32) -> Self {
        Self { book: AtomicI32::new(book) }
    }
}

impl Default for SharedFocus {
    fn default() -> Self {
        Self::new(1)
    }
}

impl FocusTracker for SharedFocus {
    fn book(&self) -> i32 {
        self.book.load(Ordering::SeqCst)
    }

    fn set_book(&self, book: i32) {
        self.book.store(book, Ordering::SeqCst);
    }
}
