use super::token::{TokenType, Token, look_up_ident};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    read_position: usize,
    ch: char,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let mut l = Lexer {
            input: input.chars().collect(),
            position: 0,
            read_position: 0,
            ch: char::from(0),
        };
        l.read_char();
        l
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_white_space();

        let tok = match self.ch {
            '=' => if self.peek_char() == '=' {
                    let ch = self.ch;
                    self.read_char();
                    let literal = ch.to_string() + &*self.ch.to_string();
                    Token {
                        token_type: TokenType::EQ,
                        literal
                    }
                } else {
                    new_token(TokenType::ASSIGN, self.ch)
                },
            '+' => new_token(TokenType::PLUS, self.ch),
            '-' => new_token(TokenType::MINUS, self.ch),
            '*' => new_token(TokenType::ASTERISK, self.ch),
            '/' => new_token(TokenType::SLASH, self.ch),
            '!' => if self.peek_char() == '=' {
                let ch = self.ch;
                self.read_char();
                let literal = ch.to_string() + &*self.ch.to_string();
                Token {
                    token_type: TokenType::NotEq,
                    literal
                }
            } else {
                new_token(TokenType::BANG, self.ch)
            },
            '<' => new_token(TokenType::LT, self.ch),
            '>' => new_token(TokenType::GT, self.ch),
            ';' => new_token(TokenType::SEMICOLON, self.ch),
            ':' => new_token(TokenType::COLON, self.ch),
            ',' => new_token(TokenType::COMMA, self.ch),
            '{' => new_token(TokenType::LBRACE, self.ch),
            '}' => new_token(TokenType::RBRACE, self.ch),
            '(' => new_token(TokenType::LPAREN, self.ch),
            ')' => new_token(TokenType::RPAREN, self.ch),
            '[' => new_token(TokenType::LBRACKET, self.ch),
            ']' => new_token(TokenType::RBRACKET, self.ch),
            '"' => Token{
                token_type: TokenType::STRING,
                literal: self.read_string(),
            },
            '\0' => Token {
                token_type: TokenType::EOF,
                literal: String::new(),
            },
            _ => if is_letter(self.ch) {
                let literal = self.read_identifier();
                return Token {
                    token_type: look_up_ident(&literal),
                    literal,
                }
            } else if is_digit(self.ch) {
                let literal = self.read_number();
                return Token {
                    token_type: TokenType::INT,
                    literal,
                }
            } else {
                new_token(TokenType::ILLEGAL, self.ch)
            },
        };
        self.read_char();

        tok
    }

    fn skip_white_space(&mut self) {
        while self.ch == ' ' || self.ch == '\t' || self.ch == '\n' || self.ch == '\r' {
            self.read_char();
        }
    }

    fn read_char(&mut self) {
        self.ch = if self.read_position >= self.input.len() {
            char::from(0)
        } else {
            self.input[self.read_position]
        };
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> char {
        if self.read_position >= self.input.len() {
            char::from(0)
        } else {
            self.input[self.read_position]
        }
    }

    // identifiers are letters and underscores only, digits end the scan
    fn read_identifier(&mut self) -> String {
        let position = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        self.input[position..self.position].iter().collect()
    }

    fn read_number(&mut self) -> String {
        let position = self.position;
        while is_digit(self.ch) {
            self.read_char();
        }
        self.input[position..self.position].iter().collect()
    }

    fn read_string(&mut self) -> String {
        let position = self.position + 1;
        loop {
            self.read_char();
            if self.ch == '"' || self.ch == char::from(0) {
                break;
            }
        }
        self.input[position..self.position].iter().collect()
    }

}

fn is_letter(ch: char) -> bool {
    ch >= 'a' && ch <= 'z' || ch >= 'A' && ch <= 'Z' || ch == '_'
}

fn is_digit(ch: char) -> bool {
    ch >= '0' && ch <= '9'
}

fn new_token(token_type: TokenType, ch: char) -> Token {
    Token {
        token_type,
        literal: ch.to_string(),
    }
}
