use std::error::Error;
use std::fmt;

/// Renders an error together with its chain of sources.
///
/// This is the full error detail written next to a failed invocation.
pub struct ErrorReport<'a> {
    error: &'a (dyn Error + 'static),
    with_chain: bool,
}

impl<'a> ErrorReport<'a> {
    pub fn new(error: &'a (dyn Error + 'static)) -> Self {
        Self {
            error,
            with_chain: true,
        }
    }

    /// Only render the top-level error
    pub fn top_level(mut self) -> Self {
        self.with_chain = false;
        self
    }

    pub fn error(&self) -> &'a (dyn Error + 'static) {
        self.error
    }

    /// Iterate over the sources of the error, outermost first
    pub fn causes(&self) -> impl Iterator<Item = &'a (dyn Error + 'static)> {
        std::iter::successors(self.error.source(), |&e| e.source())
    }
}

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if self.with_chain {
            for (depth, cause) in self.causes().enumerate() {
                write!(f, "\n  {}: caused by: {}", depth, cause)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct ConnectError;

    #[derive(Debug, thiserror::Error)]
    #[error("payment gateway unavailable")]
    struct GatewayError(#[source] ConnectError);

    #[derive(Debug, thiserror::Error)]
    #[error("order could not be placed")]
    struct PlaceError(#[source] GatewayError);

    #[test]
    fn test_report_includes_source_chain() {
        let error = PlaceError(GatewayError(ConnectError));
        let report = ErrorReport::new(&error).to_string();

        assert_eq!(
            report,
            "order could not be placed\n  0: caused by: payment gateway unavailable\n  1: caused by: connection refused"
        );
    }

    #[test]
    fn test_causes_borrow_from_the_error() {
        let error = PlaceError(GatewayError(ConnectError));
        let causes: Vec<&(dyn Error + 'static)> = ErrorReport::new(&error).causes().collect();

        let messages: Vec<String> = causes.iter().map(|c| c.to_string()).collect();
        assert_eq!(messages, vec!["payment gateway unavailable", "connection refused"]);
    }

    #[test]
    fn test_top_level_report() {
        let error = PlaceError(GatewayError(ConnectError));
        let report = ErrorReport::new(&error).top_level();

        assert_eq!(report.to_string(), "order could not be placed");
        assert_eq!(report.causes().count(), 2);
    }
}
