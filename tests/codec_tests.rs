use cipherforge::codec::{decode, encode, normalize};
use cipherforge::error::CipherForgeError;
use cipherforge::key::Key;
use rstest::rstest;

#[rstest]
#[case(11)]
#[case(42)]
#[case(777)]
#[case(31337)]
fn encode_then_decode_round_trips(#[case] seed: u64) {
    let mut rng = fastrand::Rng::with_seed(seed);
    let key = Key::random(&mut rng);
    let plaintext = b"ATTACKATDAWNANDRETREATBYNIGHT";

    let ciphertext = encode(plaintext, &key).unwrap();
    assert_eq!(decode(&ciphertext, &key).unwrap(), plaintext.to_vec());
}

#[test]
fn decoding_with_inverse_key_undoes_decoding() {
    let mut rng = fastrand::Rng::with_seed(9);
    let key = Key::random(&mut rng);
    let text = b"SUBSTITUTIONCIPHERSFALLTOSTATISTICS";

    let once = decode(text, &key).unwrap();
    let twice = decode(&once, &key.invert()).unwrap();
    assert_eq!(twice, text.to_vec());
}

#[test]
fn identity_key_decodes_to_itself() {
    assert_eq!(
        decode(b"HELLO", &Key::identity()).unwrap(),
        b"HELLO".to_vec()
    );
}

#[rstest]
#[case(b"HEL LO", b' ', 3)]
#[case(b"HELl", b'l', 3)]
#[case(b"1ELLO", b'1', 0)]
fn decode_rejects_out_of_alphabet_symbols(
    #[case] input: &[u8],
    #[case] bad: u8,
    #[case] at: usize,
) {
    let err = decode(input, &Key::identity()).unwrap_err();
    match err {
        CipherForgeError::InvalidSymbol { byte, position } => {
            assert_eq!(byte, bad);
            assert_eq!(position, at);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn normalize_prepares_raw_input() {
    assert_eq!(
        normalize("You may use an index of coincidence!"),
        b"YOUMAYUSEANINDEXOFCOINCIDENCE".to_vec()
    );
    assert_eq!(normalize("123 .,;"), Vec::<u8>::new());
}
