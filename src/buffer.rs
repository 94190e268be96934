//! Growable output buffer and the output sink contract.
//!
//! This module provides the two ways formatted text leaves the engine:
//!
//! - [`Buffer`]: an owned, contiguous byte buffer with inline (stack)
//!   storage for short outputs, spilling to the heap only when needed
//! - [`Sink`]: the minimal "append a run of text" contract the engine is
//!   written against, so it can target an in-memory buffer, a `String`, or
//!   any caller-supplied destination uniformly
//!
//! ## Growth Strategy
//!
//! Outputs up to [`Buffer::INLINE_CAPACITY`] bytes never touch the heap.
//! Beyond that, capacity grows geometrically (at least 1.5x, with a minimum
//! absolute step) to keep the number of reallocations logarithmic.
//!
//! A buffer created with [`Buffer::with_limit`] refuses to grow past its
//! limit and reports [`Error::CapacityExceeded`] instead, which is how
//! fixed-size destinations are modeled.
//!
//! ## Examples
//!
//! ```rust
//! use strform::{Buffer, Sink};
//!
//! let mut buf = Buffer::new();
//! buf.write_str("hello, ").unwrap();
//! buf.write_str("world").unwrap();
//! assert_eq!(buf.as_str(), "hello, world");
//! ```

use crate::{Error, Result};

/// The minimal output contract consumed by the formatting engine.
///
/// Anything that can append a contiguous run of text qualifies. The engine
/// and user-defined formatters write exclusively through this trait.
///
/// # Examples
///
/// ```rust
/// use strform::Sink;
///
/// let mut out = String::new();
/// out.write_str("abc").unwrap();
/// out.write_char('!').unwrap();
/// assert_eq!(out, "abc!");
/// ```
pub trait Sink {
    /// Appends a string slice to the output.
    fn write_str(&mut self, s: &str) -> Result<()>;

    /// Appends a single character to the output.
    fn write_char(&mut self, c: char) -> Result<()> {
        let mut tmp = [0u8; 4];
        self.write_str(c.encode_utf8(&mut tmp))
    }
}

impl Sink for String {
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.push_str(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> Result<()> {
        self.push(c);
        Ok(())
    }
}

/// Storage for a [`Buffer`]: inline until the threshold, then heap.
enum Storage {
    Inline { buf: [u8; Buffer::INLINE_CAPACITY], len: usize },
    Heap(Vec<u8>),
}

/// An owned, growable output buffer with inline storage for short outputs.
///
/// All engine components write through this (or any other [`Sink`]). The
/// buffer only ever receives valid UTF-8 because its write methods take
/// `&str` and `char`.
///
/// # Examples
///
/// ```rust
/// use strform::{Buffer, Sink};
///
/// let mut buf = Buffer::new();
/// buf.write_str("42").unwrap();
/// assert_eq!(buf.len(), 2);
/// assert_eq!(buf.into_string(), "42");
/// ```
///
/// Fixed-capacity destinations report overflow as an error instead of
/// growing:
///
/// ```rust
/// use strform::{Buffer, Sink};
///
/// let mut buf = Buffer::with_limit(4);
/// assert!(buf.write_str("1234").is_ok());
/// assert!(buf.write_str("5").is_err());
/// ```
pub struct Buffer {
    storage: Storage,
    limit: Option<usize>,
}

impl Buffer {
    /// Outputs up to this many bytes stay on the stack.
    pub const INLINE_CAPACITY: usize = 128;

    /// Minimum absolute growth step once the buffer is on the heap.
    const MIN_GROW: usize = 32;

    /// Creates an empty buffer with inline storage.
    #[must_use]
    pub fn new() -> Self {
        Buffer {
            storage: Storage::Inline {
                buf: [0; Self::INLINE_CAPACITY],
                len: 0,
            },
            limit: None,
        }
    }

    /// Creates an empty buffer pre-sized for at least `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity <= Self::INLINE_CAPACITY {
            Self::new()
        } else {
            Buffer {
                storage: Storage::Heap(Vec::with_capacity(capacity)),
                limit: None,
            }
        }
    }

    /// Creates a buffer that refuses to hold more than `limit` bytes.
    ///
    /// Writes that would exceed the limit fail with
    /// [`Error::CapacityExceeded`] and leave the buffer contents
    /// unspecified, per the engine's error contract.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Buffer {
            storage: Storage::Inline {
                buf: [0; Self::INLINE_CAPACITY],
                len: 0,
            },
            limit: Some(limit),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.storage {
            Storage::Inline { len, .. } => *len,
            Storage::Heap(v) => v.len(),
        }
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the buffer contents as a string slice.
    ///
    /// # Panics
    ///
    /// Panics if the buffer holds invalid UTF-8, which cannot happen through
    /// the public API (all writes take `&str` or `char`); such a panic
    /// indicates a bug, not a user error.
    #[must_use]
    pub fn as_str(&self) -> &str {
        let bytes = match &self.storage {
            Storage::Inline { buf, len } => &buf[..*len],
            Storage::Heap(v) => v.as_slice(),
        };
        std::str::from_utf8(bytes).expect("buffer holds valid UTF-8 by construction")
    }

    /// Consumes the buffer and returns its contents as a `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        match self.storage {
            Storage::Inline { buf, len } => {
                String::from_utf8(buf[..len].to_vec()).expect("buffer holds valid UTF-8 by construction")
            }
            Storage::Heap(v) => {
                String::from_utf8(v).expect("buffer holds valid UTF-8 by construction")
            }
        }
    }

    /// Discards the contents, keeping any heap capacity for reuse.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Inline { len, .. } => *len = 0,
            Storage::Heap(v) => v.clear(),
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let needed = self.len() + bytes.len();
        if let Some(limit) = self.limit {
            if needed > limit {
                return Err(Error::capacity(needed, limit));
            }
        }
        match &mut self.storage {
            Storage::Inline { buf, len } if needed <= Self::INLINE_CAPACITY => {
                buf[*len..needed].copy_from_slice(bytes);
                *len = needed;
            }
            Storage::Inline { buf, len } => {
                // Spill: geometric growth from the inline threshold.
                let cap = needed.max(Self::INLINE_CAPACITY * 2);
                let mut v = Vec::with_capacity(cap);
                v.extend_from_slice(&buf[..*len]);
                v.extend_from_slice(bytes);
                self.storage = Storage::Heap(v);
            }
            Storage::Heap(v) => {
                if needed > v.capacity() {
                    let grown = (v.capacity() + v.capacity() / 2).max(v.capacity() + Self::MIN_GROW);
                    v.reserve(needed.max(grown) - v.len());
                }
                v.extend_from_slice(bytes);
            }
        }
        Ok(())
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for Buffer {
    fn write_str(&mut self, s: &str) -> Result<()> {
        self.push_bytes(s.as_bytes())
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("limit", &self.limit)
            .finish()
    }
}

impl std::fmt::Display for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
