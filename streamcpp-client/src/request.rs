//! Request construction.
//!
//! Builds the single [`StreamCppRequest`] message from a file snapshot and
//! cursor location. The schema carries many more fields than the client
//! populates; everything not listed here is sent at its default, which is
//! what the service expects from a fresh session with no edit history.

use chrono::Local;
use streamcpp_proto::{
    CppIntentInfo, CurrentFileInfo, CursorPosition, FileDiffHistory, LspSuggestedItems,
    StreamCppRequest,
};

/// Model requested for completions.
const MODEL_NAME: &str = "fast";

/// Intent source reported for a manual request.
const INTENT_SOURCE: &str = "line_change";

/// Seed diff-history entry for a file the service has not seen edits for.
const SEED_DIFF: &str = "1+| \n";

/// The file snapshot and cursor location a completion is requested for.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// Logical filename sent to the service (e.g. `app.py`).
    pub path: String,
    /// Full file contents.
    pub contents: String,
    /// Language id (e.g. `python`, `rust`).
    pub language_id: String,
    /// Zero-based cursor line.
    pub cursor_line: i32,
    /// Zero-based cursor column.
    pub cursor_col: i32,
    /// Absolute workspace root path.
    pub workspace_root: String,
}

impl FileContext {
    /// Create a context with the cursor at the origin and defaults for the
    /// remaining fields.
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            language_id: "python".into(),
            cursor_line: 0,
            cursor_col: 0,
            workspace_root: ".".into(),
        }
    }
}

/// Build the request message for one completion call.
pub fn build_request(ctx: &FileContext) -> StreamCppRequest {
    let now = unix_time_secs();

    let current_file = CurrentFileInfo {
        relative_workspace_path: ctx.path.clone(),
        contents: ctx.contents.clone(),
        cursor_position: Some(CursorPosition {
            line: ctx.cursor_line,
            column: ctx.cursor_col,
        }),
        language_id: ctx.language_id.clone(),
        total_number_of_lines: ctx.contents.matches('\n').count() as i32 + 1,
        contents_start_at_line: 0,
        rely_on_filesync: false,
        workspace_root_path: ctx.workspace_root.clone(),
        line_ending: "\n".into(),
        ..Default::default()
    };

    StreamCppRequest {
        current_file: Some(current_file),
        model_name: MODEL_NAME.into(),
        give_debug_output: false,
        file_diff_histories: vec![FileDiffHistory {
            file_name: ctx.path.clone(),
            diff_history: vec![SEED_DIFF.into()],
        }],
        cpp_intent_info: Some(CppIntentInfo {
            source: INTENT_SOURCE.into(),
        }),
        client_time: now,
        time_since_request_start: now,
        time_at_request_send: now,
        client_timezone_offset: local_utc_offset_minutes(),
        lsp_suggested_items: Some(LspSuggestedItems::default()),
        supports_cpt: false,
        supports_crlf_cpt: false,
        ..Default::default()
    }
}

fn unix_time_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

fn local_utc_offset_minutes() -> f64 {
    f64::from(Local::now().offset().local_minus_utc()) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_lines() {
        let ctx = FileContext::new("app.py", "a\nb\nc");
        let req = build_request(&ctx);
        assert_eq!(req.current_file.unwrap().total_number_of_lines, 3);

        let ctx = FileContext::new("app.py", "no newline");
        let req = build_request(&ctx);
        assert_eq!(req.current_file.unwrap().total_number_of_lines, 1);

        let ctx = FileContext::new("app.py", "trailing\n");
        let req = build_request(&ctx);
        assert_eq!(req.current_file.unwrap().total_number_of_lines, 2);
    }

    #[test]
    fn test_cursor_passthrough() {
        let mut ctx = FileContext::new("lib.rs", "fn main() {}\n");
        ctx.language_id = "rust".into();
        ctx.cursor_line = 0;
        ctx.cursor_col = 12;

        let file = build_request(&ctx).current_file.unwrap();
        assert_eq!(file.language_id, "rust");
        let cursor = file.cursor_position.unwrap();
        assert_eq!((cursor.line, cursor.column), (0, 12));
    }

    #[test]
    fn test_fixed_request_fields() {
        let req = build_request(&FileContext::new("app.py", "x = 1\n"));

        assert_eq!(req.model_name, "fast");
        assert!(!req.give_debug_output);
        assert_eq!(req.cpp_intent_info.unwrap().source, "line_change");
        assert_eq!(req.file_diff_histories.len(), 1);
        assert_eq!(req.file_diff_histories[0].file_name, "app.py");
        assert_eq!(req.file_diff_histories[0].diff_history, ["1+| \n"]);
        assert!(req.lsp_suggested_items.is_some());
        assert!(req.client_time > 0.0);
    }
}
