//! Filesystem abstraction: the one question the evaluator asks of the
//! outside world is "does this path name a regular file, and if so, when
//! was it last modified".

use std::time::SystemTime;

/// MTime info gathered for a file.  This also models "file is absent".
/// It's not using an Option<> just because it makes the code using it
/// easier to follow.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MTime {
    Missing,
    Stamp(SystemTime),
}

impl MTime {
    pub fn exists(&self) -> bool {
        matches!(self, MTime::Stamp(_))
    }

    /// True iff this is a stamp strictly newer than `time`.  Equal stamps
    /// never count as newer.
    pub fn is_after(&self, time: SystemTime) -> bool {
        match self {
            MTime::Missing => false,
            MTime::Stamp(t) => *t > time,
        }
    }
}

pub trait FileSystem {
    /// stat() an on-disk path, producing its MTime.  Queried fresh on
    /// every call; results are never cached between lookups.
    fn stat(&self, path: &str) -> std::io::Result<MTime>;
}

pub struct RealFileSystem {}

impl RealFileSystem {
    pub fn new() -> Self {
        RealFileSystem {}
    }
}

impl FileSystem for RealFileSystem {
    fn stat(&self, path: &str) -> std::io::Result<MTime> {
        Ok(match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => MTime::Stamp(meta.modified()?),
            // Directories etc. don't count as targets or inputs.
            Ok(_) => MTime::Missing,
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    MTime::Missing
                } else {
                    return Err(err);
                }
            }
        })
    }
}
