//! 名前の検証ルール
//!
//! ルールは順番に評価され、最初に違反したルールのエラーが返されます。
//!
//! 1. 名・姓の両方が存在し、空でない → `MissingField`
//! 2. それぞれ 2 文字以上 → `TooShort`
//! 3. それぞれ英字・ラテン拡張文字（U+00C0〜U+017F）・アポストロフィのみ → `InvalidCharacters`

use super::{error::NameValidationError, value_object::Username};

/// 名前として受け付ける最小の長さ
pub const MIN_NAME_LENGTH: usize = 2;

/// 名と姓を検証し、表示名（`"名 姓"`）を返す
///
/// 副作用のない純粋関数です。
pub fn validate_name(
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Username, NameValidationError> {
    let (first_name, last_name) = match (first_name, last_name) {
        (Some(first), Some(last)) if !first.is_empty() && !last.is_empty() => (first, last),
        _ => return Err(NameValidationError::MissingField),
    };

    if name_length(first_name) < MIN_NAME_LENGTH || name_length(last_name) < MIN_NAME_LENGTH {
        return Err(NameValidationError::TooShort);
    }

    if !is_name_charset(first_name) || !is_name_charset(last_name) {
        return Err(NameValidationError::InvalidCharacters);
    }

    Ok(Username::compose(first_name, last_name))
}

/// 長さは UTF-16 のコードユニット数で数える（Web クライアントのフォームと同じ基準）
fn name_length(name: &str) -> usize {
    name.encode_utf16().count()
}

fn is_name_charset(name: &str) -> bool {
    name.chars().all(is_name_char)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{017F}').contains(&c) || c == '\''
}
