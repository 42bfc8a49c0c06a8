use bigcalc::{Response, Session, SessionError};

/// Outcome of one executed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineStatus {
    Continue,
    Exit,
}

/// Execute a single line and print the response
pub(crate) fn execute_line(
    session: &mut Session,
    input: &str,
    print_output: bool,
) -> Result<LineStatus, SessionError> {
    let response = session.execute(input)?;

    if print_output {
        if let Some(text) = response.render() {
            println!("{}", text);
        }
    }

    if response == Response::Exit {
        Ok(LineStatus::Exit)
    } else {
        Ok(LineStatus::Continue)
    }
}

/// Lines worth executing from a file: skips blanks and `#` comments
pub(crate) fn script_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}
