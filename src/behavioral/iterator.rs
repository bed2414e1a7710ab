//! # Iterator: chunked data stream
//!
//! [`DataStream`] is the aggregate; [`StreamIterator`] walks it by position
//! without exposing the underlying storage.

use std::iter::FusedIterator;

#[derive(Debug, Clone, Default)]
pub struct DataStream<T> {
    chunks: Vec<T>,
}

impl<T> DataStream<T> {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    pub fn add_chunk(&mut self, chunk: T) {
        self.chunks.push(chunk);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.chunks.get(index)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> StreamIterator<'_, T> {
        StreamIterator {
            stream: self,
            position: 0,
        }
    }
}

impl<T> FromIterator<T> for DataStream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            chunks: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a DataStream<T> {
    type Item = &'a T;
    type IntoIter = StreamIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor over a [`DataStream`]. Each stream can hand out any number of
/// independent iterators.
#[derive(Debug, Clone)]
pub struct StreamIterator<'a, T> {
    stream: &'a DataStream<T>,
    position: usize,
}

impl<'a, T> Iterator for StreamIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.stream.get(self.position)?;
        self.position += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stream.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for StreamIterator<'_, T> {}

impl<T> FusedIterator for StreamIterator<'_, T> {}
