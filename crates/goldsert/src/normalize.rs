/// Replace Windows' CRLF (`\r\n`) and Mac Classic CR (`\r`) line breaks with
/// Unix LF (`\n`) line breaks.
pub fn normalize_line_breaks(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut bytes = data.iter().copied().peekable();

    while let Some(b) = bytes.next() {
        if b == b'\r' {
            bytes.next_if_eq(&b'\n');
            out.push(b'\n');
        } else {
            out.push(b);
        }
    }

    out
}
