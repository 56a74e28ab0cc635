#![cfg(feature = "tokio")]
use std::io::ErrorKind;

use cardcrc::*;
use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt, BufReader};

#[tokio::test]
async fn patch_over_async_stream() {
    let (client, server) = duplex(1024);
    let mut stream = CardStream::new(BufReader::new(server));
    let mut client = client;
    client
        .write_all(b"66 C3 30 00 10 00 00 00 00 00 00 00 00 59 04 05\n59 04\n59 04 06\n")
        .await
        .unwrap();

    let mut record = stream.read_record_async().await.unwrap();
    let tail = stream.read_tail_async().await.unwrap();
    let crc = record.patch_tail(tail);
    stream.write_patched_async(&record, crc).await.unwrap();
    drop(stream);

    let mut output = String::new();
    client.read_to_string(&mut output).await.unwrap();
    assert!(output.contains("Error: expected 3 bytes, got 2"));
    assert!(output.contains("08 1F 30 00 10 00 00 00 00 00 00 00 00 59 04 06"));
    assert!(output.contains("Computed CRC = 0x1F08"));
}

#[tokio::test]
async fn variants_over_async_stream() {
    let (mut client, server) = duplex(4096);
    let mut stream = CardStream::new(BufReader::new(server));

    client
        .write_all(b"30 00 10 00 00 00 00 00 00 00 00 59 04 06\n")
        .await
        .unwrap();
    client.shutdown().await.unwrap();

    let data = stream.read_variant_input_async().await.unwrap();
    let reports = compare_variants(&data).unwrap();
    stream.write_reports_async(&data, &reports).await.unwrap();
    let err = stream.read_line_async().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    drop(stream);

    let mut output = String::new();
    client.read_to_string(&mut output).await.unwrap();
    assert!(output.contains("CRC-16 XMODEM       : 0x0035"));
    assert!(output.contains("Reader-specific variants (unverified):"));
}
