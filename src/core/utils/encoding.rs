use percent_encoding::{percent_encode, AsciiSet, CONTROLS};

/// https://url.spec.whatwg.org/#fragment-percent-encode-set
const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// https://url.spec.whatwg.org/#path-percent-encode-set
const PATH: &AsciiSet = &FRAGMENT.add(b'#').add(b'?').add(b'{').add(b'}');

/// https://url.spec.whatwg.org/#userinfo-percent-encode-set
const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Characters which would change the meaning of a path segment or a query
/// pair if they were left as is.
const COMPONENT: &AsciiSet = &USERINFO.add(b'%').add(b'&').add(b'+').add(b'$').add(b',');

/// Encode a value substituted into a path placeholder or appended to the
/// query string.
pub fn url_encode(data: &[u8]) -> String {
    percent_encode(data, COMPONENT).to_string()
}

#[cfg(test)]
mod should {
    use super::*;
    use test_case::test_case;

    #[test_case("123456" => "123456" ; "plain value")]
    #[test_case("a b" => "a%20b" ; "space")]
    #[test_case("a/b" => "a%2Fb" ; "slash")]
    #[test_case("k=v&x" => "k%3Dv%26x" ; "query delimiters")]
    #[test_case("{id}" => "%7Bid%7D" ; "braces")]
    #[test_case("1+1%" => "1%2B1%25" ; "plus and percent")]
    fn encode_component(value: &str) -> String {
        url_encode(value.as_bytes())
    }
}
