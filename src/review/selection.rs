use nom::bytes::complete::take_while1;
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::IResult;

/// Parse the entry numbers picked for editing, e.g. `1, 4,7` or `2 3`
pub(crate) fn parse_selection(input: &str) -> Result<Vec<usize>, String> {
    match all_consuming(entry_numbers)(input.trim()) {
        Ok((_, numbers)) => Ok(numbers.into_iter().map(|n| n as usize).collect()),
        Err(e) => Err(e.to_string()),
    }
}

fn entry_numbers(input: &str) -> IResult<&str, Vec<u32>> {
    separated_list1(space_comma1, nom::character::complete::u32)(input)
}

fn space_comma1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == ',' || c.is_whitespace())(input)
}

#[cfg(test)]
mod tests {
    use crate::review::selection::parse_selection;

    #[test]
    fn test() {
        assert_eq!(parse_selection("3"), Ok(vec![3]));
        assert_eq!(parse_selection(" 1, 4,7 "), Ok(vec![1, 4, 7]));
        assert_eq!(parse_selection("2 3"), Ok(vec![2, 3]));
    }

    #[test]
    fn test_invalid() {
        assert!(parse_selection("").is_err());
        assert!(parse_selection("one").is_err());
        assert!(parse_selection("1, x").is_err());
        assert!(parse_selection("1,2,").is_err());
        assert!(parse_selection("-1").is_err());
    }
}
