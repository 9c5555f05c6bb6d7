//! Source management: files, byte spans, and line/column resolution.
//!
//! Every stage of the pipeline refers back to source text through `Span`s.
//! The `SourceManager` owns all loaded files for the lifetime of a
//! compilation; tokens and diagnostics borrow into its buffers.

/// An opaque handle identifying a loaded source file within a `SourceManager`.
///
/// Handles are dense indices into the manager's file list. `SourceId::INVALID`
/// is the sentinel for "no file" (load failures, synthetic spans).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub u32);

impl SourceId {
    pub const INVALID: SourceId = SourceId(u32::MAX);

    pub fn is_valid(self) -> bool {
        self != SourceId::INVALID
    }
}

/// A half-open byte range `[start, end)` within a single source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub source_id: SourceId,
    /// Byte offset from file start (inclusive).
    pub start: u32,
    /// Byte offset from file start (exclusive).
    pub end: u32,
}

impl Span {
    pub fn new(source_id: SourceId, start: u32, end: u32) -> Self {
        Self { source_id, start, end }
    }

    /// A span covering a single byte at `offset`.
    pub fn point(source_id: SourceId, offset: u32) -> Self {
        Self::new(source_id, offset, offset + 1)
    }

    /// The invalid/empty sentinel span.
    pub fn invalid() -> Self {
        Self::new(SourceId::INVALID, 0, 0)
    }

    pub fn is_valid(&self) -> bool {
        self.source_id.is_valid() && self.start <= self.end
    }

    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Union of two spans from the same source. Spans from different sources
    /// have no meaningful union and merge to the invalid span.
    pub fn merge(&self, other: Span) -> Span {
        if self.source_id != other.source_id {
            return Span::invalid();
        }
        Span::new(
            self.source_id,
            self.start.min(other.start),
            self.end.max(other.end),
        )
    }
}

/// A loaded source file: path, content, and the line-offset table.
///
/// `line_offsets[0] == 0`; for each later entry, `line_offsets[i]` is the
/// byte index immediately after the i-th newline. Offsets are strictly
/// increasing and never exceed `content.len()`.
#[derive(Debug)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    pub line_offsets: Vec<u32>,
}

impl SourceFile {
    /// Converts a byte offset to a 1-indexed `(line, column)` pair.
    /// Returns `(0, 0)` if the offset is out of range.
    pub fn offset_to_line_col(&self, offset: u32) -> (u32, u32) {
        if self.line_offsets.is_empty() || offset as usize > self.content.len() {
            return (0, 0);
        }
        // Greatest line start <= offset.
        let line_index = match self.line_offsets.binary_search(&offset) {
            Ok(i) => i,
            Err(0) => return (1, offset + 1),
            Err(i) => i - 1,
        };
        let line = line_index as u32 + 1;
        let col = offset - self.line_offsets[line_index] + 1;
        (line, col)
    }

    /// Returns the content of a 1-indexed line, without its terminator.
    /// `\r\n` and `\n` endings are both stripped. Out-of-range lines are empty.
    pub fn get_line(&self, line_number: u32) -> &str {
        if line_number == 0 || line_number as usize > self.line_offsets.len() {
            return "";
        }
        let line_index = line_number as usize - 1;
        let start = self.line_offsets[line_index] as usize;
        let mut end = if line_index + 1 < self.line_offsets.len() {
            self.line_offsets[line_index + 1] as usize
        } else {
            self.content.len()
        };
        if end > start && self.content.as_bytes()[end - 1] == b'\n' {
            end -= 1;
        }
        if end > start && self.content.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        &self.content[start..end]
    }

    pub fn line_count(&self) -> u32 {
        self.line_offsets.len() as u32
    }
}

/// Owns all source files for a compilation and hands out dense `SourceId`s.
#[derive(Debug, Default)]
pub struct SourceManager {
    files: Vec<SourceFile>,
}

impl SourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn compute_line_offsets(content: &str) -> Vec<u32> {
        let mut offsets = vec![0u32];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                offsets.push(i as u32 + 1);
            }
        }
        offsets
    }

    fn push_file(&mut self, path: String, content: String) -> SourceId {
        let line_offsets = Self::compute_line_offsets(&content);
        let id = SourceId(self.files.len() as u32);
        self.files.push(SourceFile {
            path,
            content,
            line_offsets,
        });
        id
    }

    /// Loads a file from disk. Returns `SourceId::INVALID` if it cannot be
    /// read; loading never panics or propagates I/O errors.
    pub fn load(&mut self, path: &str) -> SourceId {
        match std::fs::read_to_string(path) {
            Ok(content) => self.push_file(path.to_owned(), content),
            Err(_) => SourceId::INVALID,
        }
    }

    /// Loads source from an in-memory string under a virtual file name.
    pub fn load_from_string(&mut self, name: &str, content: &str) -> SourceId {
        self.push_file(name.to_owned(), content.to_owned())
    }

    pub fn get(&self, id: SourceId) -> Option<&SourceFile> {
        if !id.is_valid() {
            return None;
        }
        self.files.get(id.0 as usize)
    }

    /// 1-indexed `(line, column)` for the start of `span`, or `(0, 0)`.
    pub fn get_line_col(&self, span: Span) -> (u32, u32) {
        match self.get(span.source_id) {
            Some(file) => file.offset_to_line_col(span.start),
            None => (0, 0),
        }
    }

    /// The source text covered by `span`. Empty on source mismatch or overflow.
    pub fn get_text(&self, span: Span) -> &str {
        let Some(file) = self.get(span.source_id) else {
            return "";
        };
        if !span.is_valid() || span.end as usize > file.content.len() {
            return "";
        }
        &file.content[span.start as usize..span.end as usize]
    }

    pub fn get_path(&self, id: SourceId) -> &str {
        self.get(id).map(|f| f.path.as_str()).unwrap_or("")
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
