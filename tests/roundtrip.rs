use byte_huffman::{
    codebook_from, compress, decompress, FrequencyTable, HuffmanCodec, HuffmanError,
};

fn roundtrip(data: &[u8]) -> Vec<u8> {
    let packed = compress(data).unwrap();
    let book = codebook_from(data).unwrap();
    decompress(&packed, book.reverse_map()).unwrap()
}

#[test]
fn single_distinct_symbol() {
    let packed = compress(b"AAAA").unwrap();
    assert_eq!(packed.len(), 2);
    assert_eq!(packed[0], 4);
    assert_eq!(roundtrip(b"AAAA"), b"AAAA");
}

#[test]
fn single_byte() {
    assert_eq!(compress(b"z").unwrap(), vec![0x07, 0x00]);
    assert_eq!(roundtrip(b"z"), b"z");
}

#[test]
fn empty_input() {
    assert_eq!(compress(b"").unwrap(), vec![0x00]);
    assert!(roundtrip(b"").is_empty());
}

#[test]
fn abracadabra() {
    assert_eq!(roundtrip(b"abracadabra"), b"abracadabra");
}

#[test]
fn every_byte_value_once() {
    let data: Vec<u8> = (0..=255).collect();
    let book = codebook_from(&data).unwrap();
    assert_eq!(book.len(), 256);
    assert!(book.iter().all(|(_, code)| code.len() == 8));

    let packed = compress(&data).unwrap();
    assert_eq!(packed.len(), 1 + 256);
    assert_eq!(packed[0], 0);
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn whitespace_is_preserved() {
    let data = b"\n\t  leading and trailing whitespace  \r\n";
    assert_eq!(roundtrip(data), data);
}

#[test]
fn malformed_padding_header() {
    let book = codebook_from(b"abracadabra").unwrap();
    let err = decompress(&[0xFF, 0x6E, 0x8A], book.reverse_map()).unwrap_err();
    assert!(matches!(err, HuffmanError::MalformedPadding { extra: 255, .. }));
}

#[test]
fn empty_artifact_is_rejected() {
    let book = codebook_from(b"abc").unwrap();
    let err = decompress(&[], book.reverse_map()).unwrap_err();
    assert!(matches!(err, HuffmanError::TruncatedHeader { bits: 0 }));
}

#[test]
fn stream_ending_mid_code_is_rejected() {
    // Codes: a=0 c=100 d=101 b=110 r=111. "100 0 0 0 11" ends inside a code.
    let book = codebook_from(b"abracadabra").unwrap();
    let err = decompress(&[0x00, 0b1000_0011], book.reverse_map()).unwrap_err();
    assert!(matches!(err, HuffmanError::IncompleteCode { pending: 2 }));
    assert!(err.is_corrupt_input());
}

fn fibonacci(n: usize) -> Vec<usize> {
    let mut weights = vec![1usize, 1];
    while weights.len() < n {
        let k = weights.len();
        weights.push(weights[k - 1] + weights[k - 2]);
    }
    weights.truncate(n);
    weights
}

#[test]
fn fibonacci_skewed_input() {
    // Byte i repeated fib(i) times: a chain-shaped tree 19 levels deep.
    let data: Vec<u8> = fibonacci(20)
        .into_iter()
        .enumerate()
        .flat_map(|(i, w)| std::iter::repeat(i as u8).take(w))
        .collect();
    let book = codebook_from(&data).unwrap();
    assert_eq!(book.max_code_len(), 19);
    assert_eq!(roundtrip(&data), data);
}

#[test]
fn codes_longer_than_a_machine_word() {
    let table: FrequencyTable = fibonacci(40)
        .into_iter()
        .enumerate()
        .map(|(i, w)| (i as u8, w))
        .collect();
    let codec = HuffmanCodec::from_frequencies(table).unwrap();
    let book = codec.codebook();
    assert_eq!(book.code_of(0).unwrap().len(), 39);
    assert_eq!(book.code_of(1).unwrap().len(), 39);

    let message: Vec<u8> = [0u8, 1, 39, 0, 20, 1, 1, 0, 38]
        .into_iter()
        .chain(0..40)
        .collect();
    let packed = codec.encode(&message).unwrap();
    let payload_bits = book
        .encoded_bits(&FrequencyTable::from_bytes(&message))
        .unwrap();
    assert_eq!(packed.len(), 1 + payload_bits.div_ceil(8));
    assert_eq!(codec.decode(&packed).unwrap(), message);
}
