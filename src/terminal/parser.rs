use crate::terminal::ast::{CommandName, CommandNode, Program};
use crate::terminal::lexer::{Intent, Token, TokenKind};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Literal,
    Natural,
}

/// `None` means no command could be recognised. That is a parse failure, not an error.
pub fn parse(tokens: &[Token], mode: Mode) -> Option<CommandNode> {
    let (first, rest) = tokens.split_first()?;
    match mode {
        Mode::Literal => {
            let mut root = CommandNode::new(CommandName::parse(&first.lexeme));
            for token in rest {
                root.push_arg(&token.lexeme);
            }
            Some(root)
        }
        Mode::Natural => parse_natural_language(tokens),
    }
}

fn parse_natural_language(tokens: &[Token]) -> Option<CommandNode> {
    let (pos, intent) = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| t.kind.intent().map(|intent| (i, intent)))?;

    let tail = &tokens[pos..];
    if let Some(ignored) = tail[1..].iter().find(|t| t.kind.intent().is_some()) {
        debug!("Ignoring additional intent keyword '{}'", ignored.lexeme);
    }

    let root = match intent {
        Intent::Create => parse_create(tail),
        Intent::Delete => parse_delete(tail),
        Intent::ChangeDir => parse_change_dir(tail),
        Intent::List => parse_list(tail),
    };
    Some(root)
}

fn node(program: Program) -> CommandNode {
    CommandNode::new(CommandName::Known(program))
}

fn parse_create(tokens: &[Token]) -> CommandNode {
    let mut root = node(Program::Mkdir);
    for (i, token) in tokens.iter().enumerate() {
        if !matches!(token.kind, TokenKind::Directory | TokenKind::Identifier) {
            continue;
        }
        if let Some(name) = tokens[i + 1..].iter().find(|t| t.kind == TokenKind::Identifier) {
            root.push_arg(&name.lexeme);
            break;
        }
    }
    root
}

fn parse_delete(tokens: &[Token]) -> CommandNode {
    let mut root = node(Program::Rm);
    for token in tokens {
        if matches!(token.kind, TokenKind::Identifier | TokenKind::Path) {
            root.push_arg(&token.lexeme);
        }
    }
    root
}

fn parse_change_dir(tokens: &[Token]) -> CommandNode {
    let mut root = node(Program::Cd);
    if let Some(target) = tokens
        .iter()
        .find(|t| matches!(t.kind, TokenKind::Identifier | TokenKind::Path))
    {
        root.push_arg(&target.lexeme);
    }
    root
}

fn parse_list(tokens: &[Token]) -> CommandNode {
    let mut root = node(Program::Ls);
    for token in tokens {
        if matches!(token.kind, TokenKind::Flag | TokenKind::Path) {
            root.push_arg(&token.lexeme);
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::lexer::{literal_tokens, tokenize};

    fn natural(text: &str) -> Option<CommandNode> {
        parse(&tokenize(text), Mode::Natural)
    }

    fn args(node: &CommandNode) -> Vec<&str> {
        node.args().collect()
    }

    #[test]
    fn test_literal_mode_keeps_words() {
        let tree = parse(&literal_tokens("mv Old.TXT ./new/place.txt"), Mode::Literal).unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Mv));
        assert_eq!(args(&tree), vec!["Old.TXT", "./new/place.txt"]);
    }

    #[test]
    fn test_create_folder_named() {
        let tree = natural("create a folder named testdir").unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Mkdir));
        assert_eq!(args(&tree), vec!["testdir"]);
    }

    #[test]
    fn test_create_takes_single_argument() {
        let tree = natural("make directory alpha beta").unwrap();
        assert_eq!(args(&tree), vec!["alpha"]);
    }

    #[test]
    fn test_delete_collects_all() {
        let tree = natural("delete notes.txt ./tmp/a.log").unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Rm));
        assert_eq!(args(&tree), vec!["notes.txt", "./tmp/a.log"]);
    }

    #[test]
    fn test_change_dir_first_target() {
        let tree = natural("go to src then docs").unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Cd));
        assert_eq!(args(&tree), vec!["src"]);
    }

    #[test]
    fn test_list_flags_and_paths() {
        let tree = natural("show contents of ./src -l").unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Ls));
        assert_eq!(args(&tree), vec!["./src", "-l"]);
    }

    #[test]
    fn test_intent_without_arguments() {
        let tree = natural("list contents").unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Ls));
        assert!(tree.arguments.is_empty());
    }

    #[test]
    fn test_first_intent_wins() {
        let tree = natural("please list then delete everything").unwrap();
        assert_eq!(tree.name, CommandName::Known(Program::Ls));
    }

    #[test]
    fn test_no_intent_is_none() {
        assert!(natural("please do something").is_none());
        assert!(parse(&[], Mode::Natural).is_none());
        assert!(parse(&[], Mode::Literal).is_none());
    }
}
