//! Boolean/phrase query compilation.
//!
//! A sanitized query is compiled into a [`QueryExpr`] tree that the
//! full-text index evaluates against its positional postings.
//!
//! # Grammar
//!
//! ```text
//! or      := and ( "OR" and )*
//! and     := not ( ["AND"] not )*      adjacency is an implicit AND
//! not     := primary ( "NOT" primary )*
//! primary := WORD | "PHRASE" | "(" or ")"
//! ```
//!
//! Keywords are recognized only in upper case; `and`, `or` and `not` are
//! ordinary search words.

use thiserror::Error;

/// A query the index cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Query syntax error: {0}")]
pub struct QuerySyntaxError(pub String);

/// Compiled query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// A single lowercased token
    Term(String),
    /// Tokens that must appear adjacent and in order
    Phrase(Vec<String>),
    And(Box<QueryExpr>, Box<QueryExpr>),
    Or(Box<QueryExpr>, Box<QueryExpr>),
    /// Documents matching the left side but not the right
    Not(Box<QueryExpr>, Box<QueryExpr>),
}

impl QueryExpr {
    /// Terms that contribute to relevance and highlighting.
    ///
    /// Everything on the excluded side of a `NOT` is left out. Duplicates are
    /// removed, first occurrence wins.
    pub fn positive_terms(&self) -> Vec<String> {
        let mut terms = Vec::new();
        self.collect_positive(&mut terms);
        terms
    }

    fn collect_positive(&self, out: &mut Vec<String>) {
        match self {
            QueryExpr::Term(term) => push_unique(out, term),
            QueryExpr::Phrase(tokens) => {
                for token in tokens {
                    push_unique(out, token);
                }
            }
            QueryExpr::And(left, right) | QueryExpr::Or(left, right) => {
                left.collect_positive(out);
                right.collect_positive(out);
            }
            QueryExpr::Not(include, _) => include.collect_positive(out),
        }
    }
}

fn push_unique(out: &mut Vec<String>, term: &str) {
    if !out.iter().any(|t| t == term) {
        out.push(term.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Phrase(Vec<String>),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

/// Splits text into lowercased alphanumeric runs.
///
/// This must agree with the index tokenizer, otherwise query terms would
/// never meet indexed terms.
pub(crate) fn word_tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn lex(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c == '(' {
            tokens.push(Token::LParen);
            chars.next();
        } else if c == ')' {
            tokens.push(Token::RParen);
            chars.next();
        } else if c == '"' {
            chars.next();
            let body_start = start + 1;
            let mut body_end = input.len();
            for (i, ch) in chars.by_ref() {
                if ch == '"' {
                    body_end = i;
                    break;
                }
            }
            tokens.push(Token::Phrase(word_tokens(&input[body_start..body_end])));
        } else if c.is_alphanumeric() {
            let mut end = input.len();
            while let Some(&(i, ch)) = chars.peek() {
                if !ch.is_alphanumeric() {
                    end = i;
                    break;
                }
                chars.next();
            }
            let word = &input[start..end];
            tokens.push(match word {
                "AND" => Token::And,
                "OR" => Token::Or,
                "NOT" => Token::Not,
                _ => Token::Word(word.to_lowercase()),
            });
        } else {
            // Separator punctuation and whitespace
            chars.next();
        }
    }

    tokens
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_or(&mut self) -> Result<QueryExpr, QuerySyntaxError> {
        let mut expr = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            expr = QueryExpr::Or(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<QueryExpr, QuerySyntaxError> {
        let mut expr = self.parse_not()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.advance();
                }
                Some(Token::Word(_)) | Some(Token::Phrase(_)) | Some(Token::LParen) => {}
                _ => break,
            }
            let right = self.parse_not()?;
            expr = QueryExpr::And(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn parse_not(&mut self) -> Result<QueryExpr, QuerySyntaxError> {
        let mut expr = self.parse_primary()?;
        while self.peek() == Some(&Token::Not) {
            self.advance();
            let excluded = self.parse_primary()?;
            expr = QueryExpr::Not(Box::new(expr), Box::new(excluded));
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<QueryExpr, QuerySyntaxError> {
        match self.advance() {
            Some(Token::Word(word)) => Ok(QueryExpr::Term(word)),
            Some(Token::Phrase(mut tokens)) => {
                if tokens.len() == 1 {
                    Ok(QueryExpr::Term(tokens.remove(0)))
                } else {
                    Ok(QueryExpr::Phrase(tokens))
                }
            }
            Some(Token::LParen) => {
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(QuerySyntaxError("unbalanced parentheses".to_string())),
                }
            }
            Some(Token::RParen) => Err(QuerySyntaxError("unexpected ')'".to_string())),
            Some(Token::And) => Err(QuerySyntaxError("unexpected AND".to_string())),
            Some(Token::Or) => Err(QuerySyntaxError("unexpected OR".to_string())),
            Some(Token::Not) => Err(QuerySyntaxError("unexpected NOT".to_string())),
            None => Err(QuerySyntaxError("unexpected end of query".to_string())),
        }
    }
}

/// Compiles a sanitized query into an expression tree.
///
/// # Errors
///
/// Returns [`QuerySyntaxError`] for an empty query, unbalanced parentheses,
/// and leading, trailing or doubled operators.
pub fn compile_query(sanitized: &str) -> Result<QueryExpr, QuerySyntaxError> {
    let tokens = lex(sanitized);
    if tokens.is_empty() {
        return Err(QuerySyntaxError("empty query".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or()?;

    match parser.peek() {
        None => Ok(expr),
        Some(Token::RParen) => Err(QuerySyntaxError("unexpected ')'".to_string())),
        Some(token) => Err(QuerySyntaxError(format!("unexpected token {:?}", token))),
    }
}
