use crate::domain::entities::{Request, Response};
use crate::domain::errors::TransportError;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

/// Printed in place of the request body when none was given.
pub const NO_BODY: &str = "<none>";

fn print_header_lines<'a, W: Write>(
    out: &mut W,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<()> {
    for (name, value) in headers {
        writeln!(out, "\t- {}={}", name, value)?;
    }
    Ok(())
}

pub fn print_request<W: Write>(out: &mut W, request: &Request) -> Result<()> {
    writeln!(out, "* Request: {} {}", request.method, request.url)?;
    writeln!(out, "\n* Request Headers:")?;
    print_header_lines(out, request.headers.iter())?;
    writeln!(out, "\n* Request Body:")?;
    writeln!(out, "\t{}", request.body.as_deref().unwrap_or(NO_BODY))?;
    out.flush()?;
    Ok(())
}

pub fn print_response<W: Write>(out: &mut W, response: &Response) -> Result<()> {
    writeln!(out, "\n* Response: {}", response.status)?;
    writeln!(out, "\n* Response Headers:")?;
    print_header_lines(
        out,
        response
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )?;
    writeln!(out, "\n* Response Body:")?;
    writeln!(out, "\t{}", response.body)?;
    out.flush()?;
    Ok(())
}

pub fn print_failure<W: Write>(out: &mut W, error: &TransportError) -> Result<()> {
    writeln!(out, "\n{} {}", "error:".red().bold(), error)?;
    out.flush()?;
    Ok(())
}
