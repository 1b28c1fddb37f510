//! The braille translation adapter: a small trait hiding either a fake,
//! always-available translator or a real `liblouis` binding behind the
//! `liblouis` Cargo feature.
//!
//! Grounded in `liblouis-mt.h`: the real adapter mirrors that header's
//! `extern "C"` surface (`lou_setDataPath`, `lou_translateString`,
//! `lou_free`, the `lou_log*` triplet) rather than linking the full
//! `liblouis` Rust crate ecosystem, since the historical project spoke to
//! the C library directly through a hand-trimmed header of its own.

use crate::error::BrailleError;

/// `liblouis`'s own buffer limit for one `lou_translateString` call
/// (`LIBLOUIS_MAXSTRING` in `liblouis-mt.h`).
pub const MAX_CHUNK_LEN: usize = 512;

/// Grade-1 UEB table file name (`LIBLOUIS_UEB_G1_TABLE`).
pub const UEB_G1_TABLE: &str = "en-ueb-g1.ctb";

/// Translates a run of ordinary prose into grade-1 Unified English Braille.
///
/// Implementations are not required to be `Send`/`Sync`: `liblouis` keeps
/// process-wide state (loaded tables, data path, log level) and is not
/// safe to call reentrantly from multiple threads, so the whole pipeline
/// runs single-threaded.
pub trait BrailleTranslator {
    fn translate(&mut self, chunk: &str) -> Result<String, BrailleError>;
}

/// A direct ASCII-art grade-1 approximation used by tests and by any build
/// without the `liblouis` feature enabled. It does not attempt contractions
/// (grade 2) or the library's letter-indicator quirk; it exists so the
/// rendering pipeline is exercisable without linking a system library.
#[derive(Debug, Default)]
pub struct FakeBrailleTranslator;

impl BrailleTranslator for FakeBrailleTranslator {
    fn translate(&mut self, chunk: &str) -> Result<String, BrailleError> {
        if chunk.len() > MAX_CHUNK_LEN {
            return Err(BrailleError::ChunkTooLarge { len: chunk.len(), max: MAX_CHUNK_LEN });
        }
        let mut out = String::with_capacity(chunk.len());
        for ch in chunk.chars() {
            if ch.is_ascii_uppercase() {
                out.push(',');
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        Ok(out)
    }
}

#[cfg(feature = "liblouis")]
mod ffi {
    use std::ffi::{CStr, CString};
    use std::os::raw::{c_char, c_int};

    /// `typedef unsigned short widechar` in `liblouis-mt.h`.
    pub type LouWidechar = u16;
    /// `typedef unsigned char formtype` in `liblouis-mt.h`.
    pub type LouFormtype = u8;

    #[repr(C)]
    pub enum LouLogLevel {
        All = 0,
        Debug = 1,
        Info = 2,
        Warn = 3,
        Error = 4,
        Fatal = 5,
        Off = 6,
    }

    unsafe extern "C" {
        pub fn lou_translateString(
            table_list: *const c_char,
            inbuf: *const LouWidechar,
            inlen: *mut c_int,
            outbuf: *mut LouWidechar,
            outlen: *mut c_int,
            typeform: *mut LouFormtype,
            spacing: *mut c_char,
            mode: c_int,
        ) -> c_int;
        pub fn lou_free();
        pub fn lou_setDataPath(path: *const c_char) -> c_int;
        pub fn lou_getDataPath() -> *const c_char;
        pub fn lou_logFile(filename: *const c_char);
        pub fn lou_setLogLevel(level: c_int);
        pub fn lou_logEnd();
    }

    /// Safe-ish wrapper: encodes `text` as UTF-16, translates it through
    /// `table`, and decodes the result. `text` must already be within
    /// [`super::MAX_CHUNK_LEN`].
    pub fn translate(table: &CStr, text: &str) -> Result<String, i32> {
        let input: Vec<LouWidechar> = text.encode_utf16().collect();
        let mut inlen = input.len() as c_int;
        let mut outbuf = vec![0 as LouWidechar; super::MAX_CHUNK_LEN * 2];
        let mut outlen = outbuf.len() as c_int;

        let status = unsafe {
            lou_translateString(
                table.as_ptr(),
                input.as_ptr(),
                &mut inlen,
                outbuf.as_mut_ptr(),
                &mut outlen,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                0,
            )
        };
        if status == 0 {
            return Err(status);
        }
        outbuf.truncate(outlen.max(0) as usize);
        Ok(String::from_utf16_lossy(&outbuf))
    }

    pub fn set_data_path(path: &str) -> Result<(), ()> {
        let c_path = CString::new(path).map_err(|_| ())?;
        let status = unsafe { lou_setDataPath(c_path.as_ptr()) };
        if status == 0 { Err(()) } else { Ok(()) }
    }
}

/// The real `liblouis`-backed translator. Initializes the table data path
/// once on construction and releases library resources on drop; never
/// reentrant, matching the library's own process-wide state.
#[cfg(feature = "liblouis")]
pub struct LiblouisTranslator {
    table: std::ffi::CString,
}

#[cfg(feature = "liblouis")]
impl LiblouisTranslator {
    pub fn init(data_path: &str) -> Result<Self, BrailleError> {
        ffi::set_data_path(data_path)
            .map_err(|_| BrailleError::DataPath { path: data_path.to_string() })?;
        let table = std::ffi::CString::new(UEB_G1_TABLE)
            .expect("table name has no interior NUL");
        Ok(Self { table })
    }
}

#[cfg(feature = "liblouis")]
impl BrailleTranslator for LiblouisTranslator {
    fn translate(&mut self, chunk: &str) -> Result<String, BrailleError> {
        if chunk.len() > MAX_CHUNK_LEN {
            return Err(BrailleError::ChunkTooLarge { len: chunk.len(), max: MAX_CHUNK_LEN });
        }
        ffi::translate(&self.table, chunk).map_err(BrailleError::TranslationFailed)
    }
}

#[cfg(feature = "liblouis")]
impl Drop for LiblouisTranslator {
    fn drop(&mut self) {
        unsafe { ffi::lou_free() };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_translator_marks_uppercase() {
        let mut t = FakeBrailleTranslator;
        assert_eq!(t.translate("Ab").unwrap(), ",ab");
    }

    #[test]
    fn fake_translator_rejects_oversized_chunk() {
        let mut t = FakeBrailleTranslator;
        let chunk = "x".repeat(MAX_CHUNK_LEN + 1);
        assert!(matches!(t.translate(&chunk), Err(BrailleError::ChunkTooLarge { .. })));
    }
}
