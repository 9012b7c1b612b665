#[derive(Debug, Clone, PartialEq)]
pub enum Tok {
    Ident(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Arrow,
    Question,
    Dot,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub tok: Tok,
    pub line: usize,
}

/// Tokenise IDL source. `#`-comment lines are expected to have already been
/// blanked out by the caller (see `strip_comments`), so the lexer only ever
/// sees grammar tokens and whitespace.
pub fn lex(src: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (line_no, line) in src.lines().enumerate() {
        let line_no = line_no + 1;
        let mut chars = line.char_indices().peekable();
        while let Some(&(_, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            match c {
                '(' => { chars.next(); tokens.push(Token { tok: Tok::LParen, line: line_no }); }
                ')' => { chars.next(); tokens.push(Token { tok: Tok::RParen, line: line_no }); }
                '[' => { chars.next(); tokens.push(Token { tok: Tok::LBracket, line: line_no }); }
                ']' => { chars.next(); tokens.push(Token { tok: Tok::RBracket, line: line_no }); }
                ',' => { chars.next(); tokens.push(Token { tok: Tok::Comma, line: line_no }); }
                ':' => { chars.next(); tokens.push(Token { tok: Tok::Colon, line: line_no }); }
                '?' => { chars.next(); tokens.push(Token { tok: Tok::Question, line: line_no }); }
                '.' => { chars.next(); tokens.push(Token { tok: Tok::Dot, line: line_no }); }
                '-' => {
                    chars.next();
                    if let Some(&(_, '>')) = chars.peek() {
                        chars.next();
                        tokens.push(Token { tok: Tok::Arrow, line: line_no });
                    }
                }
                c if c.is_alphanumeric() || c == '_' => {
                    let mut ident = String::new();
                    while let Some(&(_, c)) = chars.peek() {
                        if c.is_alphanumeric() || c == '_' {
                            ident.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token { tok: Tok::Ident(ident), line: line_no });
                }
                _ => {
                    chars.next();
                }
            }
        }
    }
    tokens
}

/// Blank out `#`-comment lines (leading-whitespace then `#`), preserving
/// line numbers so later diagnostics stay accurate, and collect the
/// comment text keyed by the line number of the next non-blank,
/// non-comment line — i.e. the line a doc string would attach to.
pub fn strip_comments(src: &str) -> (String, std::collections::HashMap<usize, String>) {
    let mut code_lines = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let mut doc_for_line = std::collections::HashMap::new();

    for (idx, line) in src.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            let text = trimmed.trim_start_matches('#').trim_start();
            pending.push(text.to_string());
            code_lines.push(String::new());
        } else if trimmed.is_empty() {
            code_lines.push(String::new());
        } else {
            if !pending.is_empty() {
                doc_for_line.insert(line_no, pending.join("\n"));
                pending.clear();
            }
            code_lines.push(line.to_string());
        }
    }

    (code_lines.join("\n"), doc_for_line)
}
