//! Serialized tree format: a pre-order symbol stream where `$` marks an absent subtree.
//!
//! `AB$$C$$` is the tree with root `A`, left leaf `B` and right leaf `C`.
//! Symbols are single Unicode scalar values with no separators between them.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, Bytes, Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::{BinaryTree, NodeId};
use crate::domain::error::{BuildError, BuildResult};

/// Symbol reserved for "no node here".
pub const NULL_SENTINEL: char = '$';

/// What running out of symbols mid-tree means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncationPolicy {
    /// Exhaustion is a `TruncatedSource` error
    #[default]
    Strict,
    /// Exhaustion reads as an endless run of sentinels
    Lenient,
}

/// What to do with symbols left over once the tree is complete.
///
/// Whitespace after the tree (a final newline) is accepted under both policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingPolicy {
    /// Stop reading as soon as the tree is complete
    Ignore,
    /// Fail on any non-whitespace symbol after the tree
    #[default]
    Reject,
}

impl fmt::Display for TruncationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruncationPolicy::Strict => f.write_str("strict"),
            TruncationPolicy::Lenient => f.write_str("lenient"),
        }
    }
}

impl FromStr for TruncationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(TruncationPolicy::Strict),
            "lenient" => Ok(TruncationPolicy::Lenient),
            other => Err(format!("unknown truncation policy: {other}")),
        }
    }
}

impl fmt::Display for TrailingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrailingPolicy::Ignore => f.write_str("ignore"),
            TrailingPolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for TrailingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(TrailingPolicy::Ignore),
            "reject" => Ok(TrailingPolicy::Reject),
            other => Err(format!("unknown trailing policy: {other}")),
        }
    }
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub truncation: TruncationPolicy,
    pub trailing: TrailingPolicy,
}

impl BuildOptions {
    /// Accepts everything older tree files were accepted with.
    pub fn lenient() -> Self {
        Self {
            truncation: TruncationPolicy::Lenient,
            trailing: TrailingPolicy::Ignore,
        }
    }
}

/// Single-pass UTF-8 symbol reader over any byte source.
pub struct Symbols<R: Read> {
    bytes: Bytes<BufReader<R>>,
    consumed: usize,
}

impl<R: Read> Symbols<R> {
    pub fn new(reader: R) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            consumed: 0,
        }
    }

    /// Number of symbols successfully read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn invalid(&self) -> BuildError {
        BuildError::InvalidEncoding {
            position: self.consumed,
        }
    }
}

impl<R: Read> Iterator for Symbols<R> {
    type Item = BuildResult<char>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.bytes.next()? {
            Ok(b) => b,
            Err(e) => return Some(Err(e.into())),
        };
        let width = match first {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Some(Err(self.invalid())),
        };

        let mut buf = [first, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.bytes.next() {
                Some(Ok(b)) => *slot = b,
                Some(Err(e)) => return Some(Err(e.into())),
                None => return Some(Err(self.invalid())),
            }
        }

        match std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(symbol) => {
                self.consumed += 1;
                Some(Ok(symbol))
            }
            None => Some(Err(self.invalid())),
        }
    }
}

/// Child position still waiting for its subtree.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Left(NodeId),
    Right(NodeId),
}

/// Non-recursive pre-order decoder.
///
/// `pending` mirrors the recursive call stack: after a key is read its right
/// slot is pushed below its left slot, so the whole left subtree is consumed
/// before the right one starts.
#[instrument(level = "debug", skip(symbols))]
fn decode<R: Read>(symbols: &mut Symbols<R>, options: &BuildOptions) -> BuildResult<BinaryTree> {
    let mut tree = BinaryTree::new();
    let mut pending = vec![Slot::Root];
    let mut exhausted = false;

    while let Some(slot) = pending.pop() {
        let symbol = if exhausted {
            None
        } else {
            symbols.next().transpose()?
        };

        if symbol.is_none() && !exhausted {
            match options.truncation {
                TruncationPolicy::Strict => {
                    return Err(BuildError::TruncatedSource {
                        consumed: symbols.consumed(),
                        pending: pending.len() + 1,
                    });
                }
                TruncationPolicy::Lenient => {
                    debug!(
                        consumed = symbols.consumed(),
                        open = pending.len() + 1,
                        "source exhausted, closing open subtrees"
                    );
                    exhausted = true;
                }
            }
        }

        let child = match symbol {
            Some(key) if key != NULL_SENTINEL => {
                let idx = tree.insert_node(key);
                pending.push(Slot::Right(idx));
                pending.push(Slot::Left(idx));
                Some(idx)
            }
            _ => None,
        };

        match slot {
            Slot::Root => tree.set_root(child),
            Slot::Left(parent) => tree.set_left(parent, child),
            Slot::Right(parent) => tree.set_right(parent, child),
        }
    }

    if !exhausted && options.trailing == TrailingPolicy::Reject {
        reject_trailing(symbols)?;
    }
    Ok(tree)
}

fn reject_trailing<R: Read>(symbols: &mut Symbols<R>) -> BuildResult<()> {
    loop {
        let position = symbols.consumed();
        match symbols.next().transpose()? {
            None => return Ok(()),
            Some(symbol) if symbol.is_whitespace() => {}
            Some(symbol) => return Err(BuildError::TrailingData { position, symbol }),
        }
    }
}

impl BinaryTree {
    /// Replaces this tree with the one decoded from `reader`.
    ///
    /// The new tree is built aside and only swapped in on success; on error
    /// the current tree is left untouched. A source holding just `$` is a
    /// valid, empty tree.
    #[instrument(level = "debug", skip(self, reader))]
    pub fn build_from_source<R: Read>(
        &mut self,
        reader: R,
        options: &BuildOptions,
    ) -> BuildResult<()> {
        let mut symbols = Symbols::new(reader);
        let tree = decode(&mut symbols, options)?;
        debug!(
            nodes = tree.len(),
            consumed = symbols.consumed(),
            "tree decoded"
        );
        *self = tree;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn build_from_path(&mut self, path: &Path, options: &BuildOptions) -> BuildResult<()> {
        let unavailable = |source| BuildError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(unavailable)?;
        // Directories open fine on Unix and only fail on the first read
        if file.metadata().map_err(unavailable)?.is_dir() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }
        self.build_from_source(file, options)
    }

    pub fn decode(input: &str, options: &BuildOptions) -> BuildResult<Self> {
        let mut tree = Self::new();
        tree.build_from_source(input.as_bytes(), options)?;
        Ok(tree)
    }

    /// Pre-order encoding with `$` for every absent child; inverse of `decode`.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(2 * self.len() + 1);
        let mut stack = vec![self.root()];
        while let Some(slot) = stack.pop() {
            match slot.and_then(|idx| self.node(idx)) {
                Some(node) => {
                    out.push(node.key());
                    stack.push(node.right());
                    stack.push(node.left());
                }
                None => out.push(NULL_SENTINEL),
            }
        }
        out
    }

    pub fn write_encoded<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(self.encode().as_bytes())?;
        out.flush()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.encode())
    }
}

impl FromStr for BinaryTree {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s, &BuildOptions::default())
    }
}
