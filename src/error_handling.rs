use std::path::PathBuf;
use std::fmt::Display;

pub trait ErrorType: Display {}

// Where in a grammar source something went wrong. Line 0 means the source
// as a whole (e.g. it could not be opened)
#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize
}

impl Location {
    pub fn whole(file: PathBuf) -> Self {
        Location { file, line: 0 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub location: Location,
    pub error: T
}

impl<T: ErrorType> Error<T> {
    pub fn at(location: Location, error: T) -> Self {
        Error { location, error }
    }
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.location, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Oops;

    impl Display for Oops {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "oops")
        }
    }

    impl ErrorType for Oops {}

    #[test]
    fn location_display() {
        assert_eq!(Location::whole(PathBuf::from("g.txt")).to_string(), "g.txt");
        assert_eq!(Location { file: PathBuf::from("g.txt"), line: 4 }.to_string(), "g.txt:4");
    }

    #[test]
    fn error_display_mentions_location_and_message() {
        let error = Error::at(Location { file: PathBuf::from("g.txt"), line: 2 }, Oops);
        let text = error.to_string();
        assert!(text.contains("[g.txt:2]"));
        assert!(text.contains("oops"));
    }
}
