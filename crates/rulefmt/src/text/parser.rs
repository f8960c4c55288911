//! Recursive-descent parser for the canonical rule text form.
//!
//! ```text
//! Rule      := Operator "(" Child ("," Child)* ")" | Leaf
//! Child     := ["~"] Rule
//! Leaf      := "[" Condition "]"
//! Condition := Name "<" Number | Name ">=" Number | Number "<=" Name "<" Number
//! ```
//!
//! Whitespace between tokens is ignored. Column names are resolved through a
//! [`ColumnNames`] mapping.

use crate::error::{Result, RulefmtError};
use crate::rule::{Child, ColumnNames, Operator, Predicate, Rule, MAX_DEPTH};
use crate::util::format::parse_number;

pub struct RuleParser<'a> {
    input: &'a str,
    pos: usize,
    columns: &'a ColumnNames,
}

impl<'a> RuleParser<'a> {
    pub fn new(input: &'a str, columns: &'a ColumnNames) -> Self {
        Self {
            input,
            pos: 0,
            columns,
        }
    }

    /// Parse the complete input into a validated rule.
    pub fn parse(mut self) -> Result<Rule> {
        self.skip_whitespace();
        if self.peek() == Some('~') {
            return Err(RulefmtError::parse(
                self.pos,
                "negation is only allowed on operator arguments",
            ));
        }

        let rule = self.parse_rule(0)?;

        self.skip_whitespace();
        if let Some(c) = self.peek() {
            return Err(RulefmtError::parse(
                self.pos,
                format!("unexpected trailing input starting with '{}'", c),
            ));
        }

        rule.validate()?;
        Ok(rule)
    }

    fn parse_rule(&mut self, depth: usize) -> Result<Rule> {
        self.skip_whitespace();
        match self.peek() {
            Some('[') => self.parse_leaf(),
            Some(c) if c.is_ascii_alphabetic() => self.parse_node(depth),
            Some(c) => Err(RulefmtError::parse(
                self.pos,
                format!("expected operator or '[', found '{}'", c),
            )),
            None => Err(RulefmtError::parse(self.pos, "unexpected end of input")),
        }
    }

    fn parse_node(&mut self, depth: usize) -> Result<Rule> {
        let start = self.pos;
        if depth >= MAX_DEPTH {
            return Err(RulefmtError::parse(
                start,
                format!("nesting deeper than {} levels", MAX_DEPTH),
            ));
        }

        let ident = self.take_while(|c| c.is_ascii_alphanumeric());
        let operator: Operator = ident
            .parse()
            .map_err(|e: String| RulefmtError::parse(start, e))?;

        self.skip_whitespace();
        self.expect('(')?;

        let mut children = Vec::new();
        loop {
            self.skip_whitespace();
            if children.is_empty() && self.peek() == Some(')') {
                return Err(RulefmtError::parse(
                    self.pos,
                    format!("{} requires at least one argument", operator),
                ));
            }

            let negated = self.eat('~');
            let rule = self.parse_rule(depth + 1)?;
            children.push(Child { negated, rule });

            self.skip_whitespace();
            let at = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some(')') => break,
                Some(c) => {
                    return Err(RulefmtError::parse(
                        at,
                        format!("expected ',' or ')', found '{}'", c),
                    ))
                }
                None => return Err(RulefmtError::parse(start, format!("unterminated {}(", operator))),
            }
        }

        Ok(Rule::Node { operator, children })
    }

    fn parse_leaf(&mut self) -> Result<Rule> {
        let start = self.pos;
        self.expect('[')?;

        let body_start = self.pos;
        let len = self.input[body_start..]
            .find(']')
            .ok_or_else(|| RulefmtError::parse(start, "unterminated '['"))?;
        let body = &self.input[body_start..body_start + len];
        self.pos = body_start + len + 1;

        self.parse_condition(body, body_start).map(Rule::Leaf)
    }

    fn parse_condition(&self, body: &str, offset: usize) -> Result<Predicate> {
        // `lo<=name<hi` first: only a range starts with a number before `<=`.
        if let Some((low, rest)) = body.split_once("<=") {
            if let Ok(low) = parse_number(low) {
                let (name, high) = rest.rsplit_once('<').ok_or_else(|| {
                    RulefmtError::parse(offset, format!("expected '<' in range condition '{}'", body))
                })?;
                return Ok(Predicate::Between {
                    column: self.resolve(name, offset)?,
                    low,
                    high: number(high, offset)?,
                });
            }
        }

        if let Some((name, threshold)) = body.rsplit_once(">=") {
            return Ok(Predicate::GreaterEqual {
                column: self.resolve(name, offset)?,
                threshold: number(threshold, offset)?,
            });
        }

        if let Some((name, threshold)) = body.rsplit_once('<') {
            return Ok(Predicate::LessThan {
                column: self.resolve(name, offset)?,
                threshold: number(threshold, offset)?,
            });
        }

        Err(RulefmtError::parse(offset, format!("invalid condition '{}'", body)))
    }

    fn resolve(&self, name: &str, offset: usize) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RulefmtError::parse(offset, "missing column name"));
        }
        self.columns
            .index_of(name)
            .ok_or_else(|| RulefmtError::UnknownColumn(name.to_string()))
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        let at = self.pos;
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(RulefmtError::parse(
                at,
                format!("expected '{}', found '{}'", expected, c),
            )),
            None => Err(RulefmtError::parse(
                at,
                format!("expected '{}', found end of input", expected),
            )),
        }
    }

    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &input[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_ascii_whitespace());
    }
}

fn number(s: &str, offset: usize) -> Result<f64> {
    parse_number(s).map_err(|e| RulefmtError::parse(offset, e))
}
