// src/c_api.rs
// Stateless C surface for embedding hosts. Every returned string is owned by
// Rust and must be released with `latin_free_string`.
use crate::core::declension::decline;
use crate::core::engine::expand_latin_all;
use crate::core::types::SolveFeatures;
use crate::lexicon::parse_lexicon_row;
use std::ffi::{c_char, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};

fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_raw(text: String) -> *mut c_char {
    let text = CString::new(text)
        .unwrap_or_else(|err| {
            let mut bytes = err.into_vec();
            bytes.retain(|b| *b != 0);
            CString::new(bytes).unwrap_or_default()
        });
    text.into_raw()
}

fn error_json(message: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": message.to_string() }).to_string()
}

#[no_mangle]
pub extern "C" fn latin_expand_all(input: *const c_char) -> *mut c_char {
    let Some(text) = read_str(input) else {
        return into_raw(String::new());
    };
    let result = catch_unwind(AssertUnwindSafe(|| expand_latin_all(text)));
    let expanded = result.unwrap_or_else(|_| {
        tracing::error!("panic in latin_expand_all");
        text.to_string()
    });
    into_raw(expanded)
}

/// `row_json` is one lexicon row, `features_json` a `SolveFeatures` object.
/// Returns `{"form", "trace"}` or `{"error"}`.
#[no_mangle]
pub extern "C" fn latin_decline_json(row_json: *const c_char, features_json: *const c_char) -> *mut c_char {
    let (Some(row), Some(features)) = (read_str(row_json), read_str(features_json)) else {
        return into_raw(error_json("null or non-UTF-8 argument"));
    };
    let result = catch_unwind(AssertUnwindSafe(|| {
        let entry = match parse_lexicon_row(row) {
            Ok(entry) => entry,
            Err(err) => return error_json(err),
        };
        let features: SolveFeatures = match serde_json::from_str(features) {
            Ok(features) => features,
            Err(err) => return error_json(format!("invalid features: {err}")),
        };
        match decline(&entry, &features) {
            Ok(solved) => serde_json::to_string(&solved).unwrap_or_else(error_json),
            Err(err) => error_json(err),
        }
    }));
    into_raw(result.unwrap_or_else(|_| error_json("panic in latin_decline_json")))
}

#[no_mangle]
pub extern "C" fn latin_free_string(s: *mut c_char) {
    if !s.is_null() {
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(ptr: *mut c_char) -> String {
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        latin_free_string(ptr);
        text
    }

    #[test]
    fn expand_round_trips_through_c_strings() {
        let input = CString::new("a. lat. dex.").unwrap();
        assert_eq!(take(latin_expand_all(input.as_ptr())), "arteria lateralis dextra");
        assert_eq!(take(latin_expand_all(std::ptr::null())), "");
    }

    #[test]
    fn decline_returns_form_and_trace() {
        let row = CString::new(r#"{"lemma":"nervus","gen_sg":"nervī","pos":"noun","class":"2m_us","gender":"m"}"#)
            .unwrap();
        let features = CString::new(r#"{"pos":"noun","case":"gen","number":"sg","stripMacrons":true}"#).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&take(latin_decline_json(row.as_ptr(), features.as_ptr()))).unwrap();
        assert_eq!(json["form"], "nervi");
        assert_eq!(json["trace"]["stem_source"], "gen_sg");
    }

    #[test]
    fn decline_errors_are_json() {
        let row = CString::new(r#"{"lemma":"nervus","pos":"noun","class":"2m_us"}"#).unwrap();
        let features = CString::new(r#"{"pos":"noun","case":"gen","number":"sg"}"#).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&take(latin_decline_json(row.as_ptr(), features.as_ptr()))).unwrap();
        assert!(json["error"].as_str().unwrap().contains("genitive singular"));

        let json: serde_json::Value =
            serde_json::from_str(&take(latin_decline_json(std::ptr::null(), features.as_ptr()))).unwrap();
        assert!(json["error"].is_string());
    }
}
