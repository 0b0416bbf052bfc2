use encoding_rs::{Encoding, UTF_8};

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::mime::{self, Mime};
use crate::multer::{Field, Multipart};

use crate::multipart_boundary::{extract_boundary, remove_quotes};
use crate::{
    bind_model, FormModel, FormValueAccumulator, MultipartFormModelError,
    MultipartFormModelOptions,
};

/// A parsed multipart/form-data request: the bound model and the number of bytes the
/// file part(s) streamed into the caller's sink.
#[derive(Debug)]
pub struct MultipartFormModel<M> {
    pub model: M,
    pub file_bytes: u64,
}

enum PartKind {
    File,
    FormField(String),
}

impl<M: FormModel> MultipartFormModel<M> {
    /// Parse multipart/form-data from `body`.
    ///
    /// File parts are copied into `file_sink` as their chunks arrive; when several
    /// file parts are present their bytes are concatenated into the sink in arrival
    /// order, with no separators. Form-field parts are accumulated and bound onto a
    /// fresh `M` once the final section has been read. Neither `body` nor
    /// `file_sink` is closed; the sink is flushed before the model is returned.
    ///
    /// On failure the remaining sections are drained and no partial result is
    /// returned.
    pub async fn parse<R, W>(
        content_type: &str,
        body: R,
        file_sink: &mut W,
        options: MultipartFormModelOptions,
    ) -> Result<MultipartFormModel<M>, MultipartFormModelError>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Unpin, {
        let boundary = extract_boundary(content_type, options.max_boundary_length)?;

        let mut multipart = Multipart::new(ReaderStream::new(body), boundary);

        let mut accumulator = FormValueAccumulator::new();
        let mut file_bytes = 0u64;

        if let Err(err) =
            read_parts(&mut multipart, file_sink, &mut accumulator, &mut file_bytes, &options)
                .await
        {
            drain(&mut multipart).await;

            return Err(err);
        }

        file_sink.flush().await?;

        let model = bind_model::<M>(&accumulator)?;

        Ok(MultipartFormModel {
            model,
            file_bytes,
        })
    }
}

async fn read_parts<W: AsyncWrite + Unpin>(
    multipart: &mut Multipart<'static>,
    file_sink: &mut W,
    accumulator: &mut FormValueAccumulator,
    file_bytes: &mut u64,
    options: &MultipartFormModelOptions,
) -> Result<(), MultipartFormModelError> {
    while let Some(mut field) = multipart.next_field().await? {
        match classify(&field)? {
            PartKind::File => {
                while let Some(chunk) = field.chunk().await? {
                    *file_bytes += chunk.len() as u64;

                    file_sink.write_all(&chunk).await?;
                }
            },
            PartKind::FormField(key) => {
                let encoding = text_encoding(field.content_type());

                let bytes = field.bytes().await?;

                let (decoded, _, _) = encoding.decode(&bytes);

                let mut value = decoded.into_owned();

                if value.eq_ignore_ascii_case("undefined") {
                    value.clear();
                }

                accumulator.append(key, value);

                if accumulator.value_count() > options.max_form_value_count {
                    return Err(MultipartFormModelError::ValueCountLimitExceeded(
                        options.max_form_value_count,
                    ));
                }
            },
        }
    }

    Ok(())
}

/// Classify a section by its content disposition.
///
/// The disposition type must be `form-data`; a non-blank file name (plain or `*`
/// extended form) makes a file part, a name with no file name makes a form field,
/// anything else is invalid.
fn classify(field: &Field<'_>) -> Result<PartKind, MultipartFormModelError> {
    let disposition = field
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .ok_or(MultipartFormModelError::ContentTypeInvalid)?;

    let disposition_type = disposition.split(';').next().unwrap_or("").trim();

    if !disposition_type.eq_ignore_ascii_case("form-data") {
        return Err(MultipartFormModelError::ContentTypeInvalid);
    }

    let has_file_name = field.file_name().map_or(false, |name| !name.trim().is_empty())
        || has_extended_file_name(disposition);

    if has_file_name {
        return Ok(PartKind::File);
    }

    match field.name() {
        Some(name) if !name.trim().is_empty() => {
            // Strip the array marker so `color[]` and `color` share one key.
            Ok(PartKind::FormField(name.replace("[]", "")))
        },
        _ => Err(MultipartFormModelError::ContentTypeInvalid),
    }
}

/// Whether the disposition's parameter list carries a `filename*` (RFC 5987
/// extended) parameter. Quoted parameter values are skipped over, so a `name` value
/// containing the literal text `filename*=` cannot masquerade as a file part.
fn has_extended_file_name(disposition: &str) -> bool {
    let mut parameters = Vec::new();

    let mut in_quotes = false;
    let mut start = 0;

    for (index, byte) in disposition.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b';' if !in_quotes => {
                parameters.push(&disposition[start..index]);
                start = index + 1;
            },
            _ => (),
        }
    }

    parameters.push(&disposition[start..]);

    parameters.iter().skip(1).any(|parameter| {
        parameter
            .split_once('=')
            .map_or(false, |(key, _)| key.trim().eq_ignore_ascii_case("filename*"))
    })
}

/// The text encoding for a form-field part. An absent charset, an unknown charset,
/// or UTF-7 (unsafe, not supported) all fall back to UTF-8.
fn text_encoding(content_type: Option<&Mime>) -> &'static Encoding {
    let charset = match content_type.and_then(|media_type| media_type.get_param(mime::CHARSET)) {
        Some(charset) => charset,
        None => return UTF_8,
    };

    let label = remove_quotes(charset.as_str());

    if label.eq_ignore_ascii_case("utf-7") {
        return UTF_8;
    }

    Encoding::for_label(label.as_bytes()).unwrap_or(UTF_8)
}

/// Read the remaining sections to leave the transport in a defined state after a
/// failure. Drain errors are ignored in favor of the error that aborted the parse.
async fn drain(multipart: &mut Multipart<'static>) {
    while let Ok(Some(mut field)) = multipart.next_field().await {
        while let Ok(Some(_)) = field.chunk().await {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charset_of(content_type: &str) -> &'static Encoding {
        let media_type: Mime = content_type.parse().unwrap();

        text_encoding(Some(&media_type))
    }

    #[test]
    fn declared_charsets_are_honored() {
        assert_eq!(encoding_rs::WINDOWS_1252, charset_of("text/plain; charset=iso-8859-1"));
        assert_eq!(UTF_8, charset_of("text/plain; charset=utf-8"));
    }

    #[test]
    fn utf_7_is_forced_to_utf_8() {
        assert_eq!(UTF_8, charset_of("text/plain; charset=utf-7"));
        assert_eq!(UTF_8, charset_of("text/plain; charset=UTF-7"));
    }

    #[test]
    fn absent_or_unknown_charsets_fall_back_to_utf_8() {
        assert_eq!(UTF_8, text_encoding(None));
        assert_eq!(UTF_8, charset_of("text/plain"));
        assert_eq!(UTF_8, charset_of("text/plain; charset=no-such-charset"));
    }

    #[test]
    fn extended_file_names_are_detected_as_parameters() {
        assert!(has_extended_file_name(
            "form-data; name=\"photo\"; filename*=UTF-8''a.txt"
        ));
        assert!(has_extended_file_name("form-data; name=\"photo\"; FILENAME*=UTF-8''a.txt"));
        assert!(has_extended_file_name(
            "form-data; name=\"a;b\"; filename*=UTF-8''a.txt"
        ));
    }

    #[test]
    fn a_quoted_name_containing_the_marker_is_not_a_file_part() {
        assert!(!has_extended_file_name("form-data; name=\"filename*=trap\""));
        assert!(!has_extended_file_name("form-data; name=\"x; filename*=trap\""));
        assert!(!has_extended_file_name("form-data; name=\"field\""));
    }
}
