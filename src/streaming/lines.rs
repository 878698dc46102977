//! Line framing for streamed response bodies.

use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use tokio_util::codec::{AnyDelimiterCodec, FramedRead};
use tokio_util::io::StreamReader;

use crate::error::LlmError;

/// Raw lines of a response body, newline stripped. Lines are left as bytes so
/// a line that is not valid UTF-8 can be skipped without ending the stream.
pub type LineStream = Pin<Box<dyn Stream<Item = Result<Bytes, LlmError>> + Send>>;

/// Split a chunked byte stream into lines.
///
/// A read failure on the underlying stream surfaces as `LlmError::StreamError`
/// and ends the stream.
pub fn byte_lines<S>(byte_stream: S) -> LineStream
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
{
    let reader = StreamReader::new(byte_stream);
    let codec = AnyDelimiterCodec::new(b"\n".to_vec(), b"\n".to_vec());
    let lines = FramedRead::new(reader, codec)
        .map_err(|e| LlmError::StreamError(format!("Failed to read response stream: {e}")));
    Box::pin(lines)
}

/// Line stream over a streaming HTTP response. Dropping the returned stream
/// releases the connection.
pub fn response_lines(response: reqwest::Response) -> LineStream {
    let byte_stream = response
        .bytes_stream()
        .map_err(|e| std::io::Error::other(format!("Stream error: {e}")));
    byte_lines(byte_stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn chunks(parts: &[&'static str]) -> Vec<Result<Bytes, std::io::Error>> {
        parts.iter().map(|p| Ok(Bytes::from_static(p.as_bytes()))).collect()
    }

    #[tokio::test]
    async fn splits_lines_across_chunk_boundaries() {
        let mut lines = byte_lines(futures_util::stream::iter(chunks(&[
            "data: {\"a\"",
            ":1}\n\ndata: [DO",
            "NE]\n",
        ])));
        let mut out = Vec::new();
        while let Some(line) = lines.next().await {
            out.push(String::from_utf8(line.unwrap().to_vec()).unwrap());
        }
        assert_eq!(out, vec!["data: {\"a\":1}", "", "data: [DONE]"]);
    }

    #[tokio::test]
    async fn trailing_line_without_newline_is_emitted() {
        let mut lines = byte_lines(futures_util::stream::iter(chunks(&["a\nb"])));
        assert_eq!(lines.next().await.unwrap().unwrap(), Bytes::from_static(b"a"));
        assert_eq!(lines.next().await.unwrap().unwrap(), Bytes::from_static(b"b"));
        assert!(lines.next().await.is_none());
    }

    #[tokio::test]
    async fn read_failure_becomes_stream_error() {
        let items: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"data: x\n")),
            Err(std::io::Error::other("connection reset")),
        ];
        let mut lines = byte_lines(futures_util::stream::iter(items));
        assert!(lines.next().await.unwrap().is_ok());
        let err = lines.next().await.unwrap().unwrap_err();
        assert!(matches!(err, LlmError::StreamError(_)));
    }
}
