/// Selection read at the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Register,
    Login,
    Exit,
    /// Anything that is not `1`, `2` or `3`, including non-numeric input.
    Invalid,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Self {
        match line.trim().parse::<i64>() {
            Ok(1) => MenuChoice::Register,
            Ok(2) => MenuChoice::Login,
            Ok(3) => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// Sentinel that leaves the chat loop, compared case-insensitively.
pub const EXIT_KEYWORD: &str = "exit";

pub fn is_exit_keyword(line: &str) -> bool {
    line.eq_ignore_ascii_case(EXIT_KEYWORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_numbers_with_surrounding_whitespace() {
        assert_eq!(MenuChoice::parse("1"), MenuChoice::Register);
        assert_eq!(MenuChoice::parse(" 2 "), MenuChoice::Login);
        assert_eq!(MenuChoice::parse("3\t"), MenuChoice::Exit);
        assert_eq!(MenuChoice::parse("+3"), MenuChoice::Exit);
    }

    #[test]
    fn non_numeric_and_out_of_range_are_invalid() {
        for line in ["", "4", "0", "-1", "one", "1 2", "99999999999999999999"] {
            assert_eq!(MenuChoice::parse(line), MenuChoice::Invalid, "input {line:?}");
        }
    }

    #[test]
    fn exit_keyword_ignores_case_but_not_padding() {
        assert!(is_exit_keyword("exit"));
        assert!(is_exit_keyword("EXIT"));
        assert!(is_exit_keyword("eXiT"));
        assert!(!is_exit_keyword(" exit"));
        assert!(!is_exit_keyword("exit now"));
    }
}
