//! Message types for the `aiserver.v1.AiService/StreamCpp` RPC.
//!
//! These mirror `proto/aiserver.proto` and are maintained by hand in
//! prost-generated style so the build needs no protoc. The framing layer
//! (`streamcpp-core`) never sees these types; only the client serializes
//! and deserializes them at the envelope payload boundary.

/// Zero-based cursor location within a file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CursorPosition {
    #[prost(int32, tag = "1")]
    pub line: i32,
    #[prost(int32, tag = "2")]
    pub column: i32,
}

/// A single editor diagnostic attached to the current file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Diagnostic {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub severity: i32,
    #[prost(message, optional, tag = "3")]
    pub start: ::core::option::Option<CursorPosition>,
    #[prost(message, optional, tag = "4")]
    pub end: ::core::option::Option<CursorPosition>,
}

/// Snapshot of the file the completion is requested for.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CurrentFileInfo {
    #[prost(string, tag = "1")]
    pub relative_workspace_path: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub contents: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub cursor_position: ::core::option::Option<CursorPosition>,
    #[prost(string, tag = "4")]
    pub language_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "5")]
    pub diagnostics: ::prost::alloc::vec::Vec<Diagnostic>,
    #[prost(int32, tag = "6")]
    pub total_number_of_lines: i32,
    #[prost(int32, tag = "7")]
    pub contents_start_at_line: i32,
    #[prost(string, repeated, tag = "8")]
    pub top_chunks: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int32, repeated, tag = "9")]
    pub cell_start_lines: ::prost::alloc::vec::Vec<i32>,
    #[prost(bool, tag = "10")]
    pub rely_on_filesync: bool,
    #[prost(string, tag = "11")]
    pub workspace_root_path: ::prost::alloc::string::String,
    #[prost(string, tag = "12")]
    pub line_ending: ::prost::alloc::string::String,
}

/// Per-file edit history, newest entry last.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileDiffHistory {
    #[prost(string, tag = "1")]
    pub file_name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub diff_history: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// What triggered the completion request.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CppIntentInfo {
    #[prost(string, tag = "1")]
    pub source: ::prost::alloc::string::String,
}

/// Completion items the language server already suggested.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LspSuggestedItems {
    #[prost(string, repeated, tag = "1")]
    pub suggested_items: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// The single request message sent as the stream's only data frame.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamCppRequest {
    #[prost(message, optional, tag = "1")]
    pub current_file: ::core::option::Option<CurrentFileInfo>,
    #[prost(string, repeated, tag = "2")]
    pub diff_history: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "3")]
    pub model_name: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "4")]
    pub diff_history_keys: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bool, tag = "5")]
    pub give_debug_output: bool,
    #[prost(message, repeated, tag = "6")]
    pub file_diff_histories: ::prost::alloc::vec::Vec<FileDiffHistory>,
    #[prost(message, repeated, tag = "7")]
    pub merged_diff_histories: ::prost::alloc::vec::Vec<FileDiffHistory>,
    #[prost(string, repeated, tag = "8")]
    pub block_diff_patches: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "9")]
    pub context_items: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "10")]
    pub parameter_hints: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "11")]
    pub lsp_contexts: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "12")]
    pub cpp_intent_info: ::core::option::Option<CppIntentInfo>,
    #[prost(string, tag = "13")]
    pub workspace_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "14")]
    pub additional_files: ::prost::alloc::vec::Vec<CurrentFileInfo>,
    #[prost(double, tag = "15")]
    pub client_time: f64,
    #[prost(string, repeated, tag = "16")]
    pub filesync_updates: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(double, tag = "17")]
    pub time_since_request_start: f64,
    #[prost(double, tag = "18")]
    pub time_at_request_send: f64,
    #[prost(double, tag = "19")]
    pub client_timezone_offset: f64,
    #[prost(message, optional, tag = "20")]
    pub lsp_suggested_items: ::core::option::Option<LspSuggestedItems>,
    #[prost(bool, tag = "21")]
    pub supports_cpt: bool,
    #[prost(bool, tag = "22")]
    pub supports_crlf_cpt: bool,
    #[prost(string, repeated, tag = "23")]
    pub code_results: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// An inclusive line range in the current file.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LineRange {
    #[prost(int32, tag = "1")]
    pub start_line_number: i32,
    #[prost(int32, tag = "2")]
    pub end_line_number_inclusive: i32,
}

/// Where the server predicts the cursor should move next.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CursorPredictionTarget {
    #[prost(string, tag = "1")]
    pub relative_path: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub line_number: i32,
    #[prost(string, tag = "3")]
    pub expected_content: ::prost::alloc::string::String,
}

/// One streamed response message.
///
/// `text` carries an incremental slice of the completion; `done_edit` and
/// `done_stream` mark edit and stream completion. The `debug_*` fields are
/// only populated when the request asked for debug output.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StreamCppResponse {
    #[prost(string, tag = "1")]
    pub text: ::prost::alloc::string::String,
    #[prost(int32, optional, tag = "2")]
    pub suggestion_start_line: ::core::option::Option<i32>,
    #[prost(int32, optional, tag = "3")]
    pub suggestion_confidence: ::core::option::Option<i32>,
    #[prost(bool, tag = "4")]
    pub done_edit: bool,
    #[prost(bool, tag = "5")]
    pub done_stream: bool,
    #[prost(string, optional, tag = "6")]
    pub debug_model_output: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "7")]
    pub debug_model_input: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "8")]
    pub debug_stream_time: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "9")]
    pub debug_total_time: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "10")]
    pub debug_ttft_time: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "11")]
    pub debug_server_timing: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "12")]
    pub range_to_replace: ::core::option::Option<LineRange>,
    #[prost(message, optional, tag = "13")]
    pub cursor_prediction_target: ::core::option::Option<CursorPredictionTarget>,
    #[prost(bool, tag = "14")]
    pub done_fade_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_default_response_encodes_empty() {
        // An all-default message has no fields on the wire, so an empty
        // payload must decode back to the default message.
        let msg = StreamCppResponse::default();
        assert!(msg.encode_to_vec().is_empty());
        assert_eq!(StreamCppResponse::decode(&[][..]).unwrap(), msg);
    }

    #[test]
    fn test_response_text_round_trip() {
        let msg = StreamCppResponse {
            text: "fn main() {}".into(),
            done_edit: true,
            done_stream: true,
            ..Default::default()
        };
        let bytes = msg.encode_to_vec();
        let decoded = StreamCppResponse::decode(&bytes[..]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_request_nested_fields() {
        let req = StreamCppRequest {
            current_file: Some(CurrentFileInfo {
                relative_workspace_path: "src/app.py".into(),
                contents: "print('hi')\n".into(),
                cursor_position: Some(CursorPosition { line: 0, column: 11 }),
                language_id: "python".into(),
                total_number_of_lines: 2,
                line_ending: "\n".into(),
                ..Default::default()
            }),
            model_name: "fast".into(),
            ..Default::default()
        };

        let decoded = StreamCppRequest::decode(&req.encode_to_vec()[..]).unwrap();
        let file = decoded.current_file.unwrap();
        assert_eq!(file.relative_workspace_path, "src/app.py");
        assert_eq!(file.cursor_position.unwrap().column, 11);
        assert_eq!(decoded.model_name, "fast");
    }

    #[test]
    fn test_decode_rejects_truncated_varint() {
        // 0x0a opens a length-delimited field 1 but the length byte is cut.
        assert!(StreamCppResponse::decode(&[0x0A][..]).is_err());
    }
}
