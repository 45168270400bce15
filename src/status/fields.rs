// src/status/fields.rs

//! The ten status attributes a path can be watched for.
//!
//! Each field carries its short flag letter, long option name and a help
//! description, plus the accessor that pulls its value out of a raw
//! `std::fs::Metadata`. Keeping the accessor here keeps change detection
//! and interpolation field-agnostic.

use std::fmt;
use std::fs::Metadata;

/// One watchable status attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WatchedField {
    Mtime,
    Atime,
    Ctime,
    Dev,
    Ino,
    Mode,
    Nlink,
    Uid,
    Gid,
    Size,
}

impl WatchedField {
    /// All fields, in the order their CLI options are declared.
    pub const ALL: [WatchedField; 10] = [
        WatchedField::Mtime,
        WatchedField::Atime,
        WatchedField::Ctime,
        WatchedField::Dev,
        WatchedField::Ino,
        WatchedField::Mode,
        WatchedField::Nlink,
        WatchedField::Uid,
        WatchedField::Gid,
        WatchedField::Size,
    ];

    /// Short flag letter. Case matters: `m` is mtime, `M` is mode.
    pub fn short(self) -> char {
        match self {
            WatchedField::Mtime => 'm',
            WatchedField::Atime => 'a',
            WatchedField::Ctime => 'c',
            WatchedField::Dev => 'd',
            WatchedField::Ino => 'i',
            WatchedField::Mode => 'M',
            WatchedField::Nlink => 'n',
            WatchedField::Uid => 'u',
            WatchedField::Gid => 'g',
            WatchedField::Size => 's',
        }
    }

    /// Long option name; also the token accepted between interpolation
    /// delimiters.
    pub fn long(self) -> &'static str {
        match self {
            WatchedField::Mtime => "mtime",
            WatchedField::Atime => "atime",
            WatchedField::Ctime => "ctime",
            WatchedField::Dev => "dev",
            WatchedField::Ino => "ino",
            WatchedField::Mode => "mode",
            WatchedField::Nlink => "nlink",
            WatchedField::Uid => "uid",
            WatchedField::Gid => "gid",
            WatchedField::Size => "size",
        }
    }

    /// Human description used in `--help`.
    pub fn describe(self) -> &'static str {
        match self {
            WatchedField::Mtime => "modification time",
            WatchedField::Atime => "access time",
            WatchedField::Ctime => "status time",
            WatchedField::Dev => "device ID",
            WatchedField::Ino => "inode number",
            WatchedField::Mode => "protection mode",
            WatchedField::Nlink => "number of hard links",
            WatchedField::Uid => "user ID of owner",
            WatchedField::Gid => "group ID of owner",
            WatchedField::Size => "total size",
        }
    }

    /// Resolve an interpolation token: an exact short flag letter
    /// (case-sensitive) or a long name (case-insensitive).
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::ALL.iter().copied().find(|f| f.short() == c);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.long().eq_ignore_ascii_case(token))
    }

    /// Extract this field's value from a raw status record.
    ///
    /// Values are opaque integers compared by equality only. Time fields
    /// are whole seconds since the epoch, matching the granularity at
    /// which they are rendered into command arguments.
    #[cfg(unix)]
    pub fn value_from(self, meta: &Metadata) -> i64 {
        use std::os::unix::fs::MetadataExt;

        match self {
            WatchedField::Mtime => meta.mtime(),
            WatchedField::Atime => meta.atime(),
            WatchedField::Ctime => meta.ctime(),
            WatchedField::Dev => meta.dev() as i64,
            WatchedField::Ino => meta.ino() as i64,
            WatchedField::Mode => meta.mode() as i64,
            WatchedField::Nlink => meta.nlink() as i64,
            WatchedField::Uid => meta.uid() as i64,
            WatchedField::Gid => meta.gid() as i64,
            WatchedField::Size => meta.size() as i64,
        }
    }

    /// Non-unix fallback: only the portable attributes are meaningful;
    /// the rest read as zero and therefore never report a change.
    #[cfg(not(unix))]
    pub fn value_from(self, meta: &Metadata) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        fn epoch_secs(time: std::io::Result<SystemTime>) -> i64 {
            time.ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs() as i64)
                .unwrap_or(0)
        }

        match self {
            WatchedField::Mtime => epoch_secs(meta.modified()),
            WatchedField::Atime => epoch_secs(meta.accessed()),
            WatchedField::Size => meta.len() as i64,
            _ => 0,
        }
    }
}

impl fmt::Display for WatchedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.long())
    }
}
