//! C ABI surface for consuming the engine as a dynamic or static library.

use std::{
    os::raw::c_char,
    panic::{catch_unwind, AssertUnwindSafe},
    slice,
};

use crate::{compute_star_rating, Note};

/// Error codes returned by the C API.
///
/// These cover this library's own entry points. Consumers multiplexing the
/// out-of-process script backend alongside this one should keep its negative
/// sentinel codes (`-2` invalid path, `-3` open failure, `-4` parse failure,
/// `-5` invalid data, `-6` computation failure, `-7` computation panic)
/// separate from this enum; a rating of `-1.0` with [`ManiaSrError::Ok`]
/// already encodes "rating unavailable".
#[repr(C)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ManiaSrError {
    Ok = 0,
    NullPointer = 1,
    BufferTooSmall = 2,
    Panic = 3,
}

/// Flattened note triple. `end_time = -1` marks a plain note.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default)]
pub struct ManiaSrNote {
    pub column: i32,
    pub start_time: i32,
    pub end_time: i32,
}

impl From<ManiaSrNote> for Note {
    fn from(note: ManiaSrNote) -> Self {
        Self {
            column: note.column.max(0) as u32,
            start_time: note.start_time,
            end_time: note.end_time,
        }
    }
}

/// Convert an error code into a static, NUL-terminated string.
#[no_mangle]
pub extern "C" fn mania_sr_error_str(err: i32) -> *const c_char {
    match err {
        x if x == ManiaSrError::Ok as i32 => b"Ok\0".as_ptr(),
        x if x == ManiaSrError::NullPointer as i32 => b"NullPointer\0".as_ptr(),
        x if x == ManiaSrError::BufferTooSmall as i32 => b"BufferTooSmall\0".as_ptr(),
        x if x == ManiaSrError::Panic as i32 => b"Panic\0".as_ptr(),
        _ => b"Unknown\0".as_ptr(),
    }
    .cast::<c_char>()
}

unsafe fn collect_notes(notes: *const ManiaSrNote, len: usize) -> Vec<Note> {
    if len == 0 {
        Vec::new()
    } else {
        slice::from_raw_parts(notes, len)
            .iter()
            .copied()
            .map(Note::from)
            .collect()
    }
}

/// Calculate the star rating of a flattened note list.
///
/// Writes the rating into `out_sr`; the sentinel values of the Rust API pass
/// through unchanged (`-1.0` unavailable, `0.0` empty).
///
/// # Safety
/// - If `len != 0`, `notes` must be valid for reads of `len` elements.
/// - `out_sr` must be a valid pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn mania_sr_calculate(
    notes: *const ManiaSrNote,
    len: usize,
    key_count: u32,
    overall_difficulty: f32,
    out_sr: *mut f64,
) -> ManiaSrError {
    if out_sr.is_null() || (notes.is_null() && len != 0) {
        return ManiaSrError::NullPointer;
    }

    match catch_unwind(AssertUnwindSafe(|| {
        let notes = collect_notes(notes, len);
        let rating = compute_star_rating(&notes, key_count as usize, overall_difficulty);
        out_sr.write(rating.value);
    })) {
        Ok(()) => ManiaSrError::Ok,
        Err(_) => ManiaSrError::Panic,
    }
}

/// Calculate the star rating and serialize it as `{"sr":<double>}`.
///
/// Writes a NUL-terminated JSON payload into `buf`.
///
/// # Safety
/// - If `len != 0`, `notes` must be valid for reads of `len` elements.
/// - `buf` must be valid for writes of `buf_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn mania_sr_calculate_json(
    notes: *const ManiaSrNote,
    len: usize,
    key_count: u32,
    overall_difficulty: f32,
    buf: *mut c_char,
    buf_len: usize,
) -> ManiaSrError {
    if buf.is_null() || (notes.is_null() && len != 0) {
        return ManiaSrError::NullPointer;
    }

    match catch_unwind(AssertUnwindSafe(|| {
        let notes = collect_notes(notes, len);
        let rating = compute_star_rating(&notes, key_count as usize, overall_difficulty);
        let payload = serde_json::json!({ "sr": rating.value }).to_string();

        if payload.len() + 1 > buf_len {
            return ManiaSrError::BufferTooSmall;
        }

        let dst = buf.cast::<u8>();
        dst.copy_from_nonoverlapping(payload.as_ptr(), payload.len());
        dst.add(payload.len()).write(0);

        ManiaSrError::Ok
    })) {
        Ok(err) => err,
        Err(_) => ManiaSrError::Panic,
    }
}
