//! 当前语句的选取与规范化

use common::utils::SqlNormalizer;

use crate::state::SqlEditorState;

/// 当前聚焦的文本：有选中内容时取选中内容，否则取整个编辑器文本
pub fn active_statement<'a>(selected: &'a str, buffer: &'a str) -> &'a str {
    if selected.is_empty() {
        buffer
    } else {
        selected
    }
}

/// 当前语句的规范化形式
///
/// 无法解析的文本原样返回。
pub fn parsed_statement(state: &SqlEditorState, normalizer: &dyn SqlNormalizer) -> String {
    let text = active_statement(state.selected_statement(), state.query_statement());
    match normalizer.parse(text) {
        Some(parsed) => normalizer.transform(&parsed),
        None => {
            tracing::debug!("语句无法解析，使用原始文本");
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::utils::{ParsedSql, SqlParserNormalizer};

    /// 永远无法解析的规范化器
    struct Unparseable;

    impl SqlNormalizer for Unparseable {
        fn parse(&self, _text: &str) -> Option<ParsedSql> {
            None
        }

        fn transform(&self, _parsed: &ParsedSql) -> String {
            unreachable!("transform called without a parse result")
        }
    }

    fn state(buffer: &str, selection: &str) -> SqlEditorState {
        let mut state = SqlEditorState::default();
        state.set_query_statement(buffer);
        state.set_selected_statement(selection);
        state
    }

    #[test]
    fn test_selection_wins_over_buffer() {
        assert_eq!(active_statement("select 1", "select 2"), "select 1");
        assert_eq!(active_statement("", "select 2"), "select 2");
        assert_eq!(active_statement("", ""), "");
    }

    #[test]
    fn test_parsed_statement_normalizes_selection() {
        let state = state("select * from users; select 2", "select * from users");
        assert_eq!(
            parsed_statement(&state, &SqlParserNormalizer::default()),
            "SELECT * FROM users"
        );
    }

    #[test]
    fn test_parsed_statement_uses_buffer_without_selection() {
        let state = state("select id from orders", "");
        assert_eq!(
            parsed_statement(&state, &SqlParserNormalizer::default()),
            "SELECT id FROM orders"
        );
    }

    #[test]
    fn test_parse_failure_returns_active_text() {
        let state = state("select 1", "selec * frm users");
        assert_eq!(
            parsed_statement(&state, &SqlParserNormalizer::default()),
            "selec * frm users"
        );
    }

    #[test]
    fn test_null_parse_is_identity() {
        for (buffer, selection) in [("a", ""), ("a", "b"), ("", ""), ("  ", "")] {
            let state = state(buffer, selection);
            assert_eq!(
                parsed_statement(&state, &Unparseable),
                active_statement(selection, buffer)
            );
        }
    }
}
