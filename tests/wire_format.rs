//! Frozen ciphertext snapshots.  Any change in these bytes means
//! streams written by an earlier build can no longer be read.

use rc5::io::{decrypt_stream, encrypt_stream, Reader, Writer};
use rc5::{Error, Params, Rc5, WordSize};
use std::io::{Read, Write};

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// RC5-32/12/16 with an all-zero key, block 0.
#[test]
fn golden_vector_32_12_16() {
    let rc5 = Rc5::new(32, 12, &[0; 16]).unwrap();
    assert_eq!(rc5.encrypt_block(0).unwrap(), 0xEEDB_A521_6D8F_4B15);
    assert_eq!(rc5.decrypt_block(0xEEDB_A521_6D8F_4B15).unwrap(), 0);
}

#[test]
fn stream_16_bit_words() {
    let rc5 = Rc5::new(16, 12, b"secret").unwrap();
    let seed = 0xCAFE_BABE;
    assert_eq!(rc5.decrypt_block(seed).unwrap(), 0xBF8B_E6B7);

    let out = encrypt_stream(&rc5, seed, &mut &b"RC5 stream"[..], Vec::new()).unwrap();
    assert_eq!(hex(&out), "b7e68bbfa871e59d2892b2148eeefa5d");
    assert_eq!(decrypt_stream(&rc5, &mut &out[..], Vec::new()).unwrap(), b"RC5 stream");
}

#[test]
fn stream_32_bit_words() {
    let key: Vec<u8> = (0u8..16).collect();
    let rc5 = Rc5::new(32, 12, &key).unwrap();
    let out = encrypt_stream(&rc5, 0x0123_4567_89AB_CDEF, &mut &b"Hello, world!"[..], Vec::new())
        .unwrap();
    assert_eq!(hex(&out), "114288cf48d428bda251e59f0a1b9377f641e05c02463503");
}

#[test]
fn stream_64_bit_words() {
    let key: Vec<u8> = (0u8..24).collect();
    let rc5 = Rc5::new(64, 16, &key).unwrap();
    let seed = 0x0011_2233_4455_6677_8899_AABB_CCDD_EEFF;
    let text = b"The quick brown fox";

    let out = encrypt_stream(&rc5, seed, &mut &text[..], Vec::new()).unwrap();
    assert_eq!(
        hex(&out),
        "9890bfd9c8aa4b80d4a29d4209af7a5d\
         52ebc390027e04add9262947d136652a\
         4a40734d872664a19334022d1703bf3f"
    );
    assert_eq!(decrypt_stream(&rc5, &mut &out[..], Vec::new()).unwrap(), &text[..]);
}

/// The header is the inverse transform of the seed, and a stream made
/// of that header and one record decrypts to the record's plaintext.
#[test]
fn header_plus_one_record() {
    let rc5 = Rc5::new(32, 12, b"header").unwrap();
    let seed = 0x0F0E_0D0C_0B0A_0908;
    let link = rc5.decrypt_block(seed).unwrap();
    let plaintext = 0x4142_4344_4546_4748; // "ABCDEFGH"
    let record = rc5.encrypt_block(plaintext ^ link).unwrap();

    let mut stream = Vec::new();
    stream.extend_from_slice(&link.to_le_bytes()[..8]);
    stream.extend_from_slice(&record.to_le_bytes()[..8]);

    let out = encrypt_stream(&rc5, seed, &mut &b"ABCDEFGH"[..], Vec::new()).unwrap();
    assert_eq!(out, stream);

    let mut back = String::new();
    Reader::new(&stream[..], &rc5).unwrap().read_to_string(&mut back).unwrap();
    assert_eq!(back, "ABCDEFGH");
}

#[test]
fn writer_and_stream_driver_agree() {
    let params = Params::new(64, 12, 128).unwrap();
    let rc5 = params.cipher(&[7; 16]);
    let text = vec![0x33; 1000];

    let mut writer = Writer::new(Vec::new(), &rc5, 77).unwrap();
    writer.write_all(&text).unwrap();
    let by_writer = writer.close().unwrap();

    let by_driver = encrypt_stream(&rc5, 77, &mut &text[..], Vec::new()).unwrap();
    assert_eq!(by_writer, by_driver);
    assert_eq!(by_driver.len(), 16 + 1008);
}

#[test]
fn decrypt_with_other_word_size_fails_or_garbles() {
    let a = Rc5::with_word_size(WordSize::W32, 12, b"key");
    let out = encrypt_stream(&a, 3, &mut &b"0123456789"[..], Vec::new()).unwrap();
    let b = Rc5::with_word_size(WordSize::W64, 12, b"key");
    // 24 bytes: a 16-byte header and 8 of a 16-byte record.
    assert!(matches!(
        decrypt_stream(&b, &mut &out[..], Vec::new()),
        Err(Error::Truncated { expected: 16, found: 8 })
    ));
}
