//! FTP reply parsing
//!
//! A reply is a three-digit status code followed by text. Multi-line replies
//! open with `ddd-` and run until a line starting with `ddd ` (or exactly `ddd`).

use std::fmt;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::ChannelError;
use crate::protocol::responses::ReplyClass;

/// The complete reply to one command, continuation lines included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    code: u16,
    lines: Vec<String>,
}

impl Reply {
    /// Parses a complete reply from text. Used for canned replies and tests;
    /// live connections go through [`read_reply`].
    pub fn parse(text: &str) -> Result<Reply, ChannelError> {
        let mut assembler = ReplyAssembler::default();
        for line in text.lines() {
            if assembler.push(line)? {
                return Ok(assembler.finish());
            }
        }
        Err(ChannelError::MalformedReply(format!(
            "incomplete reply: {:?}",
            text
        )))
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// All lines of the reply, without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Text following the status code on the first line.
    pub fn message(&self) -> &str {
        self.lines[0].get(4..).unwrap_or("")
    }

    /// Lines between the opening and closing status lines of a multi-line reply.
    pub fn body(&self) -> &[String] {
        if self.lines.len() > 2 {
            &self.lines[1..self.lines.len() - 1]
        } else {
            &[]
        }
    }

    /// All lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn class(&self) -> Option<ReplyClass> {
        ReplyClass::of(self.code)
    }

    pub fn is_preliminary(&self) -> bool {
        self.class() == Some(ReplyClass::Preliminary)
    }

    pub fn is_success(&self) -> bool {
        self.class() == Some(ReplyClass::Success)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join(" | "))
    }
}

/// Collects reply lines and decides when the reply is complete.
#[derive(Debug, Default)]
struct ReplyAssembler {
    code: Option<u16>,
    lines: Vec<String>,
}

impl ReplyAssembler {
    /// Adds one line; returns `true` once the reply is complete.
    fn push(&mut self, line: &str) -> Result<bool, ChannelError> {
        let line = line.trim_end_matches(['\r', '\n']);
        self.lines.push(line.to_string());

        match self.code {
            None => {
                let code = status_code(line)?;
                self.code = Some(code);
                match line.as_bytes().get(3) {
                    None | Some(b' ') => Ok(true),
                    Some(b'-') => Ok(false),
                    Some(_) => Err(ChannelError::MalformedReply(line.to_string())),
                }
            }
            Some(code) => Ok(is_closing_line(code, line)),
        }
    }

    fn finish(self) -> Reply {
        Reply {
            code: self.code.unwrap_or_default(),
            lines: self.lines,
        }
    }
}

/// Status code from the first three characters of a reply line.
fn status_code(line: &str) -> Result<u16, ChannelError> {
    let digits = line
        .get(..3)
        .filter(|d| d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| ChannelError::MalformedReply(line.to_string()))?;

    let code: u16 = digits
        .parse()
        .map_err(|_| ChannelError::MalformedReply(line.to_string()))?;

    if ReplyClass::of(code).is_none() {
        return Err(ChannelError::MalformedReply(line.to_string()));
    }
    Ok(code)
}

fn is_closing_line(code: u16, line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 3
        && line.starts_with(&code.to_string())
        && matches!(bytes.get(3), None | Some(b' '))
}

/// Reads one complete reply from a control connection.
pub async fn read_reply<R>(reader: &mut R) -> Result<Reply, ChannelError>
where
    R: AsyncBufRead + Unpin,
{
    let mut assembler = ReplyAssembler::default();
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            return Err(ChannelError::ConnectionClosed);
        }
        if assembler.push(&line)? {
            return Ok(assembler.finish());
        }
    }
}
