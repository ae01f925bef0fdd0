use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref TOKEN_PATTERN: Regex =
        Regex::new(r"\[(Position|Start Date|EmployeeId|Salary)\]").expect("valid token pattern");
}

/// Placeholders recognized in offer-letter templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Position,
    StartDate,
    EmployeeId,
    Salary,
}

impl Token {
    pub const ALL: [Token; 4] = [
        Token::Position,
        Token::StartDate,
        Token::EmployeeId,
        Token::Salary,
    ];

    /// Literal text of the placeholder, brackets included.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Token::Position => "[Position]",
            Token::StartDate => "[Start Date]",
            Token::EmployeeId => "[EmployeeId]",
            Token::Salary => "[Salary]",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "Position" => Some(Token::Position),
            "Start Date" => Some(Token::StartDate),
            "EmployeeId" => Some(Token::EmployeeId),
            "Salary" => Some(Token::Salary),
            _ => None,
        }
    }
}

/// Values to substitute. A token without a value is left in place.
#[derive(Debug, Clone, Default)]
pub struct TokenValues {
    values: HashMap<Token, String>,
}

impl TokenValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, token: Token, value: impl Into<String>) -> Self {
        self.values.insert(token, value.into());
        self
    }

    pub fn set(&mut self, token: Token, value: Option<String>) {
        match value {
            Some(value) => {
                self.values.insert(token, value);
            }
            None => {
                self.values.remove(&token);
            }
        }
    }

    pub fn get(&self, token: Token) -> Option<&str> {
        self.values.get(&token).map(String::as_str)
    }
}

/// Replace every occurrence of every known token in a single pass.
///
/// Substituted text is never re-scanned, so a value that itself looks like
/// a placeholder stays verbatim.
pub fn compose(template: &str, values: &TokenValues) -> String {
    TOKEN_PATTERN
        .replace_all(template, |caps: &Captures| {
            let whole = &caps[0];
            Token::from_name(&caps[1])
                .and_then(|token| values.get(token))
                .unwrap_or(whole)
                .to_string()
        })
        .into_owned()
}
