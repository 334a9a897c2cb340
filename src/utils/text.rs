//! Text helpers for names and documentation

/// Derive a command name from a function name
///
/// `do_something` becomes `do-something`; a raw identifier prefix is dropped.
pub fn command_name(function_name: &str) -> String {
    function_name
        .trim_start_matches("r#")
        .replace('_', "-")
}

/// Trim every line of a description and drop the empty ones
pub fn normalize_description(description: &str) -> String {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean up doc text
///
/// Leading whitespace of the first line is stripped, the common indentation of
/// the remaining lines is removed, and leading and trailing blank lines are
/// dropped.
pub fn clean_doc(doc: &str) -> String {
    let mut lines: Vec<&str> = doc.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    cleaned.push(lines.remove(0).trim().to_string());
    for line in lines {
        let line = match line.get(..indent) {
            Some(margin) if margin.trim().is_empty() => &line[indent..],
            _ => line.trim_start(),
        };
        cleaned.push(line.trim_end().to_string());
    }

    let start = cleaned.iter().position(|l| !l.is_empty()).unwrap_or(cleaned.len());
    let end = cleaned.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
    cleaned[start..end].join("\n")
}

/// Split doc text into a short description and a long documentation
pub fn split_doc(doc: &str, command: &str) -> (String, String) {
    let doc = clean_doc(doc);
    if doc.is_empty() {
        return (command.to_string(), String::new());
    }

    let lines: Vec<&str> = doc.lines().collect();
    match lines.as_slice() {
        [single] => ((*single).to_string(), String::new()),
        [first, "", rest @ ..] => ((*first).to_string(), rest.join("\n")),
        _ => (format!("Command {command}"), doc.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_name() {
        assert_eq!(command_name("do_something_else"), "do-something-else");
        assert_eq!(command_name("r#type"), "type");
        assert_eq!(command_name("greet"), "greet");
    }

    #[test]
    fn test_clean_doc_removes_common_indent() {
        let doc = " Echo command\n\n    Detailed help\n      indented\n";
        assert_eq!(clean_doc(doc), "Echo command\n\nDetailed help\n  indented");
    }

    #[test]
    fn test_split_doc_single_line() {
        let (description, documentation) = split_doc(" Greets somebody", "greet");
        assert_eq!(description, "Greets somebody");
        assert!(documentation.is_empty());
    }

    #[test]
    fn test_split_doc_with_separator() {
        let (description, documentation) =
            split_doc(" Echo a message\n\n Shown after --help\n on two lines", "echo");
        assert_eq!(description, "Echo a message");
        assert_eq!(documentation, "Shown after --help\non two lines");
    }

    #[test]
    fn test_split_doc_without_separator() {
        let (description, documentation) = split_doc("First\nSecond", "echo");
        assert_eq!(description, "Command echo");
        assert_eq!(documentation, "First\nSecond");
    }

    #[test]
    fn test_split_doc_empty_uses_name() {
        let (description, documentation) = split_doc("  \n ", "add");
        assert_eq!(description, "add");
        assert!(documentation.is_empty());
    }
}
