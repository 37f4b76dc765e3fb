use crate::error::FoxmarksError;

pub fn exit_code_for_error(err: &FoxmarksError) -> i32 {
    match err {
        FoxmarksError::Config(_) => 2,
        FoxmarksError::Io(_) => 23,
        FoxmarksError::Json(_) => 26,
        FoxmarksError::NotFound(_) => 37,
        FoxmarksError::Query(_) => 43,
    }
}

#[cfg(test)]
mod tests {
    use super::exit_code_for_error;
    use crate::error::FoxmarksError;

    #[test]
    fn exit_code_maps_not_found() {
        let err = FoxmarksError::NotFound("places.sqlite".to_string());
        assert_eq!(exit_code_for_error(&err), 37);
    }

    #[test]
    fn exit_code_maps_query_failure() {
        let err = FoxmarksError::Query("database is locked".to_string());
        assert_eq!(exit_code_for_error(&err), 43);
    }
}
