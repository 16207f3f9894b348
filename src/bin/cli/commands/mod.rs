pub mod review;
pub mod topic;
pub mod topics;
pub mod word;
pub mod words;

use std::io::{BufRead, Write};

use anyhow::Result;

/// Ask a yes/no question on the terminal. Anything but "y"/"yes" means no.
///
/// The prompt goes to stderr, leaving stdout to command output.
pub fn confirm(question: &str) -> Result<bool> {
    ask(question, &mut std::io::stdin().lock(), &mut std::io::stderr())
}

fn ask(question: &str, input: &mut impl BufRead, prompt: &mut impl Write) -> Result<bool> {
    write!(prompt, "{} [y/N] ", question)?;
    prompt.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "д" | "да")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(is_yes("да"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("maybe"));
    }

    #[test]
    fn test_ask_writes_prompt_to_given_stream() {
        let mut input = "y\n".as_bytes();
        let mut prompt = Vec::new();

        assert!(ask("Delete topic \"Travel\"?", &mut input, &mut prompt).unwrap());
        assert_eq!(String::from_utf8(prompt).unwrap(), "Delete topic \"Travel\"? [y/N] ");
    }

    #[test]
    fn test_ask_without_answer_is_no() {
        let mut input = "".as_bytes();
        let mut prompt = Vec::new();
        assert!(!ask("Delete word?", &mut input, &mut prompt).unwrap());
    }
}
