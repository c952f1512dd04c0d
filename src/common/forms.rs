// src/common/forms.rs

// Helpers de desserialização para dados vindos de formulários HTML,
// que mandam "" em vez de omitir campos opcionais.

use std::fmt::Display;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

/// `null`, `""` ou só espaços viram `None`; qualquer outro texto é convertido
/// com `FromStr` como veio, sem aparar.
pub fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref() {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => FromStr::from_str(s).map(Some).map_err(de::Error::custom),
    }
}

/// Para atualizações parciais: campo ausente fica `None` (via `#[serde(default)]`),
/// campo presente vazio vira `Some(None)` e limpa o valor.
pub fn clearable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    empty_string_as_none(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        comments: Option<String>,
        #[serde(default, deserialize_with = "empty_string_as_none")]
        next: Option<NaiveDate>,
        #[serde(default, deserialize_with = "clearable")]
        email: Option<Option<String>>,
    }

    fn parse(json: &str) -> Form {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn text_keeps_its_surrounding_whitespace() {
        let form = parse(r#"{ "comments": "  ligar depois das 18h \n" }"#);
        assert_eq!(form.comments.as_deref(), Some("  ligar depois das 18h \n"));
    }

    #[test]
    fn blank_or_missing_becomes_none() {
        let form = parse(r#"{ "comments": "   ", "next": "", "email": " " }"#);
        assert_eq!(form.comments, None);
        assert_eq!(form.next, None);
        assert_eq!(form.email, Some(None));

        let form = parse(r#"{ "comments": null }"#);
        assert_eq!(form.comments, None);
        assert_eq!(form.email, None);
    }

    #[test]
    fn non_blank_values_go_through_from_str() {
        let form = parse(r#"{ "next": "2024-05-01", "email": "ana@gmail.com" }"#);
        assert_eq!(form.next, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(form.email, Some(Some("ana@gmail.com".to_string())));

        assert!(serde_json::from_str::<Form>(r#"{ "next": "amanhã" }"#).is_err());
    }
}
