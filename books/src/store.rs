//! The in-memory book list.
//!
//! # Design
//! One `BookStore` is built per app and shared with handlers as
//! `Arc<BookStore>`. Every operation takes the lock once, so the index check
//! and the mutation it guards cannot interleave with another request.
//! Negative indices address elements from the end of the list.

use tokio::sync::RwLock;

use crate::error::BookError;

/// Ordered, 0-indexed list of book names. Duplicates are allowed.
#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<Vec<String>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the whole list in insertion order.
    pub async fn list(&self) -> Vec<String> {
        self.books.read().await.clone()
    }

    pub async fn get(&self, index: i64) -> Result<String, BookError> {
        let books = self.books.read().await;
        let pos = resolve(index, books.len())?;
        Ok(books[pos].clone())
    }

    /// Append `name`; returns the index it landed at.
    pub async fn create(&self, name: String) -> usize {
        let mut books = self.books.write().await;
        books.push(name);
        books.len() - 1
    }

    /// Replace the element at `index`, returning the value it replaced.
    pub async fn update(&self, index: i64, name: String) -> Result<String, BookError> {
        let mut books = self.books.write().await;
        let pos = resolve(index, books.len())?;
        Ok(std::mem::replace(&mut books[pos], name))
    }

    /// Remove and return the element at `index`. Later elements shift left.
    pub async fn delete(&self, index: i64) -> Result<String, BookError> {
        let mut books = self.books.write().await;
        let pos = resolve(index, books.len())?;
        Ok(books.remove(pos))
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

/// Map `index` to a position. Negative indices count back from the end, so
/// the valid range is `-len..len`.
fn resolve(index: i64, len: usize) -> Result<usize, BookError> {
    let pos = if index < 0 {
        usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| len.checked_sub(back))
    } else {
        usize::try_from(index).ok()
    };
    pos.filter(|&pos| pos < len)
        .ok_or(BookError::IndexOutOfRange { index, len })
}
