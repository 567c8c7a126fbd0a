#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Create,
    Directory,
    Named,
    Delete,
    ChangeDir,
    To,
    List,
    Contents,
    Path,
    Flag,
    Identifier,
}

/// The four natural-language intents the parser knows how to turn into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Delete,
    ChangeDir,
    List,
}

impl TokenKind {
    pub fn intent(self) -> Option<Intent> {
        match self {
            TokenKind::Create => Some(Intent::Create),
            TokenKind::Delete => Some(Intent::Delete),
            TokenKind::ChangeDir => Some(Intent::ChangeDir),
            TokenKind::List => Some(Intent::List),
            TokenKind::Directory
            | TokenKind::Named
            | TokenKind::To
            | TokenKind::Contents
            | TokenKind::Path
            | TokenKind::Flag
            | TokenKind::Identifier => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    fn new(kind: TokenKind, lexeme: &str) -> Self {
        Self { kind, lexeme: lexeme.to_string() }
    }
}

fn keyword(word: &str) -> Option<TokenKind> {
    match word {
        "create" | "make" | "new" => Some(TokenKind::Create),
        "folder" | "directory" => Some(TokenKind::Directory),
        "named" | "called" => Some(TokenKind::Named),
        "delete" | "remove" => Some(TokenKind::Delete),
        "go" | "change" => Some(TokenKind::ChangeDir),
        "to" => Some(TokenKind::To),
        "list" | "show" => Some(TokenKind::List),
        "contents" => Some(TokenKind::Contents),
        _ => None,
    }
}

fn classify(word: &str) -> TokenKind {
    let lower = word.to_lowercase();
    if let Some(kind) = keyword(&lower) {
        kind
    } else if word.contains('/') || word.contains('\\') {
        TokenKind::Path
    } else if word.starts_with('-') {
        TokenKind::Flag
    } else {
        TokenKind::Identifier
    }
}

pub fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|word| Token::new(classify(word), word))
        .collect()
}

/// Bare command names that are run as typed, without intent scanning.
const LITERAL_COMMANDS: &[&str] = &["ls", "cd", "mkdir", "rm", "cp", "mv", "pwd", "cat", "echo"];

pub fn is_literal_command(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .map(|first| LITERAL_COMMANDS.contains(&first.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Literal input: one verbatim identifier per word, no classification.
pub fn literal_tokens(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|word| Token::new(TokenKind::Identifier, word))
        .collect()
}
