use crate::form_value::FormFieldValue;
use crate::MultipartFormModelError;

/// An object whose fields can be appended to an outgoing multipart body.
///
/// Usually implemented with the [`form_model!`](crate::form_model) macro. Fields are
/// yielded in declaration order.
pub trait FormSource {
    fn form_fields(&self) -> Vec<(&'static str, FormFieldValue)>;
}

/// An outgoing multipart body under construction.
///
/// The encoder only ever calls `append_text`; `append_file` exists for the producer
/// that attaches the upload itself.
pub trait MultipartBodyBuilder {
    /// Append a text part.
    fn append_text(&mut self, name: &str, value: &str);

    /// Append a file part with the given file name and raw content.
    fn append_file(&mut self, name: &str, file_name: &str, content: &[u8]);
}

/// Append every field of `source` to `builder` as text parts.
///
/// List-valued fields expand into one part per element, all named with the `[]`
/// suffix; scalar fields produce exactly one part. A field with no representable
/// value fails with `NullFieldValue`.
pub fn append_form_object<B, S>(
    builder: &mut B,
    source: &S,
) -> Result<(), MultipartFormModelError>
where
    B: MultipartBodyBuilder + ?Sized,
    S: FormSource + ?Sized, {
    for (name, value) in source.form_fields() {
        match value {
            FormFieldValue::Scalar(value) => builder.append_text(name, &value),
            FormFieldValue::List(values) => {
                let key = format!("{}[]", name);

                for value in values {
                    builder.append_text(&key, &value);
                }
            },
            FormFieldValue::Missing => {
                return Err(MultipartFormModelError::NullFieldValue(name))
            },
        }
    }

    Ok(())
}

/// A `MultipartBodyBuilder` that frames parts into raw `multipart/form-data` bytes
/// over a caller-chosen boundary.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    buffer: Vec<u8>,
}

impl MultipartBody {
    /// Create an empty body delimited by `boundary`.
    #[inline]
    pub fn new<S: Into<String>>(boundary: S) -> MultipartBody {
        MultipartBody {
            boundary: boundary.into(),
            buffer: Vec::new(),
        }
    }

    /// The content-type header value announcing this body's boundary.
    #[inline]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append the closing boundary and return the finished body.
    pub fn finish(mut self) -> Vec<u8> {
        self.buffer.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        self.buffer
    }
}

impl MultipartBodyBuilder for MultipartBody {
    fn append_text(&mut self, name: &str, value: &str) {
        self.buffer.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
    }

    fn append_file(&mut self, name: &str, file_name: &str, content: &[u8]) {
        self.buffer.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; \
                 filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                self.boundary, name, file_name
            )
            .as_bytes(),
        );
        self.buffer.extend_from_slice(content);
        self.buffer.extend_from_slice(b"\r\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form_value::FormFieldValue;

    struct Fields(Vec<(&'static str, FormFieldValue)>);

    impl FormSource for Fields {
        fn form_fields(&self) -> Vec<(&'static str, FormFieldValue)> {
            self.0.clone()
        }
    }

    #[test]
    fn scalars_append_one_part_and_lists_repeat_with_the_array_marker() {
        let source = Fields(vec![
            ("name", FormFieldValue::Scalar(String::from("value"))),
            (
                "colors",
                FormFieldValue::List(vec![String::from("red"), String::from("blue")]),
            ),
        ]);

        let mut body = MultipartBody::new("B");
        append_form_object(&mut body, &source).unwrap();

        let text = String::from_utf8(body.finish()).unwrap();

        assert_eq!(1, text.matches("name=\"name\"").count());
        assert_eq!(2, text.matches("name=\"colors[]\"").count());
        assert!(text.ends_with("--B--\r\n"));
    }

    #[test]
    fn missing_values_are_rejected() {
        let source = Fields(vec![("gone", FormFieldValue::Missing)]);

        let mut body = MultipartBody::new("B");

        assert!(matches!(
            append_form_object(&mut body, &source),
            Err(crate::MultipartFormModelError::NullFieldValue("gone"))
        ));
    }

    #[test]
    fn file_parts_carry_the_raw_content() {
        let mut body = MultipartBody::new("B");
        body.append_file("file", "file.csv", b"a,b,c\n");

        assert_eq!("multipart/form-data; boundary=B", body.content_type());

        let bytes = body.finish();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.contains("filename=\"file.csv\""));
        assert!(text.contains("a,b,c\n"));
    }
}
