use encoded_mail::{Composer, MessageBody};
use pretty_assertions::assert_eq;

#[test]
fn simple_message_wire_format() {
    let message = Composer::new()
        .construct_simple_encoded_message(
            "test@example.com",
            "test@example.com",
            "Un Subj\u{c3}\u{a9}t",
            "A simple body with some non ascii t\u{c3}\u{a9}xt",
            &[("X-Test", "t\u{c3}\u{a9}st")],
            "utf8",
        )
        .unwrap();

    assert_eq!(
        String::from_utf8(message.formatted()).unwrap(),
        concat!(
            "From: test@example.com\r\n",
            "To: test@example.com\r\n",
            "Subject: Un =?utf8?b?U3ViasODwql0?=\r\n",
            "X-Test: =?utf8?b?dMODwqlzdA==?=\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: text/plain; charset=\"utf8\"\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "\r\n",
            "A simple body with some non ascii t=C3=83=C2=A9xt"
        )
    );
}

#[test]
fn multipart_message_wire_format() {
    let message = Composer::new()
        .construct_multipart(
            "test@example.com",
            "test@example.com",
            "Un Subj\u{c3}\u{a9}t",
            "A simple body with some non ascii t\u{c3}\u{a9}xt",
            "<p>A simple body with some non ascii t\u{c3}\u{a9}xt</p>",
            &[("X-Test", "t\u{c3}\u{a9}st")],
            "utf8",
        )
        .unwrap();

    let boundary = match message.body() {
        MessageBody::Alternative(multi) => multi.boundary(),
        MessageBody::Raw(_) => panic!("expected multipart body"),
    };

    let expected = format!(
        concat!(
            "From: test@example.com\r\n",
            "To: test@example.com\r\n",
            "Subject: Un =?utf8?b?U3ViasODwql0?=\r\n",
            "X-Test: =?utf8?b?dMODwqlzdA==?=\r\n",
            "MIME-Version: 1.0\r\n",
            "Content-Type: multipart/alternative; boundary=\"{boundary}\"\r\n",
            "\r\n",
            "--{boundary}\r\n",
            "Content-Type: text/plain; charset=\"utf8\"\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "Content-Disposition: inline\r\n",
            "\r\n",
            "A simple body with some non ascii t=C3=83=C2=A9xt\r\n",
            "--{boundary}\r\n",
            "Content-Type: text/html; charset=\"utf8\"\r\n",
            "Content-Transfer-Encoding: quoted-printable\r\n",
            "Content-Disposition: inline\r\n",
            "\r\n",
            "<p>A simple body with some non ascii t=C3=83=C2=A9xt</p>\r\n",
            "--{boundary}--\r\n",
        ),
        boundary = boundary
    );

    assert_eq!(String::from_utf8(message.formatted()).unwrap(), expected);
}

#[test]
fn multipart_from_stx_wire_format() {
    let converter = |text: &str| format!("<p>{text}</p>\n");
    let message = Composer::new()
        .construct_multipart_from_stx(
            "test@example.com",
            "test@example.com",
            "subject",
            "A body with \"a link\":http://www.example.com",
            &[],
            "utf8",
            &converter,
        )
        .unwrap();

    let multi = match message.body() {
        MessageBody::Alternative(multi) => multi,
        MessageBody::Raw(_) => panic!("expected multipart body"),
    };

    // the plain alternative carries the original text, the html one the
    // converter output with its line ending normalized to CRLF
    assert_eq!(
        multi.parts()[0].raw_body(),
        b"A body with \"a link\":http://www.example.com"
    );
    assert_eq!(
        multi.parts()[1].raw_body(),
        b"<p>A body with \"a link\":http://www.example.com</p>\r\n".as_slice()
    );
}

#[test]
fn header_round_trip_through_wire_value() {
    let composer = Composer::new();
    let message = composer
        .construct_simple_encoded_message(
            "exp\u{e9}diteur@example.com",
            "destinataire@example.com",
            "Je les d\u{e9}t\u{e8}ste oui?",
            "body",
            &[],
            "utf-8",
        )
        .unwrap();

    let subject = message.headers().get_raw("Subject").unwrap();
    assert!(subject.is_ascii());
    assert_eq!(
        encoded_mail::decode_header(subject),
        "Je les d\u{e9}t\u{e8}ste oui?"
    );
}
