use atty::Stream;
use std::io::{self, Read};

/// Reads a secret value, either typed at a prompt or piped in on stdin.
pub fn get_secret_value(prompt_string: &str) -> String {
    // are we reading from user input?
    let input = if atty::is(Stream::Stdin) {
        println!("{}", prompt_string);
        read!("{}\n")
    } else {
        // or is this data from a pipe? (support newlines)
        let mut tmp = String::new();
        let _ = io::stdin().read_to_string(&mut tmp);
        tmp
    };
    strip_trailing_whitespace(input)
}

fn strip_trailing_whitespace(mut input: String) -> String {
    input.truncate(input.trim_end().len());
    input
}
