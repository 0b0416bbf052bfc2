use crate::MultipartFormModelError;

/// Strip one pair of surrounding double quotes, if present, and trim whitespace.
pub(crate) fn remove_quotes(value: &str) -> &str {
    let value = value.trim();

    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].trim()
    } else {
        value
    }
}

#[inline]
fn is_multipart(content_type: &str) -> bool {
    content_type.len() >= 10 && content_type[..10].eq_ignore_ascii_case("multipart/")
}

/// Extract the multipart boundary from a content-type header value.
///
/// The content type must be `multipart/*` and must carry a non-blank `boundary`
/// parameter whose unquoted length does not exceed `max_length`.
///
/// The parameter list is scanned directly rather than through a full media-type
/// parse, so a malformed boundary value is still reported as a boundary problem and
/// not as a foreign content type.
pub fn extract_boundary(
    content_type: &str,
    max_length: usize,
) -> Result<String, MultipartFormModelError> {
    let trimmed = content_type.trim();

    if !is_multipart(trimmed) {
        return Err(MultipartFormModelError::NotMultipart(content_type.to_string()));
    }

    let boundary = trimmed.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;

        if key.trim().eq_ignore_ascii_case("boundary") {
            Some(remove_quotes(value))
        } else {
            None
        }
    });

    let boundary = match boundary {
        Some(boundary) => boundary.to_string(),
        None => return Err(MultipartFormModelError::MissingBoundary),
    };

    if boundary.is_empty() {
        return Err(MultipartFormModelError::MissingBoundary);
    }

    if boundary.len() > max_length {
        return Err(MultipartFormModelError::BoundaryTooLong(max_length));
    }

    Ok(boundary)
}
