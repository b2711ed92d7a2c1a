//! End-to-end tests: the full client loop against a scripted server over an
//! in-memory pipe.

use deskbot::{ClientConfig, DeskbotError, SessionEnd, build_session, run_session};
use deskbot_duel::RawCoreCodec;
use deskbot_session::StopReason;
use deskbot_transport::{FramedTransport, TransportConfig, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream, duplex};
use tokio::task::JoinHandle;

// =========================================================================
// Helpers
// =========================================================================

/// Reads one client frame: returns (type, body).
async fn read_frame(server: &mut DuplexStream) -> (u8, Vec<u8>) {
    let mut header = [0u8; 3];
    server.read_exact(&mut header).await.expect("header");
    let size = u16::from_le_bytes([header[0], header[1]]) as usize;
    let mut body = vec![0u8; size - 1];
    server.read_exact(&mut body).await.expect("body");
    (header[2], body)
}

async fn send_frame(server: &mut DuplexStream, type_id: u8, body: &[u8]) {
    let size = (body.len() + 1) as u16;
    let mut frame = size.to_le_bytes().to_vec();
    frame.push(type_id);
    frame.extend_from_slice(body);
    server.write_all(&frame).await.expect("send");
}

fn join_ack(t0_count: i32) -> Vec<u8> {
    let mut body = vec![0u8; 56];
    body[32..36].copy_from_slice(&t0_count.to_le_bytes());
    body
}

/// Starts the client on one end of a pipe and returns the other end.
async fn start_client(
    config: ClientConfig,
    deck: Option<Vec<u32>>,
) -> (DuplexStream, JoinHandle<Result<SessionEnd, DeskbotError>>) {
    let (client, server) = duplex(64 * 1024);
    let mut session = build_session(&config).await.expect("session");
    if let Some(deck) = deck {
        session = session.with_deck(deck);
    }
    let handle = tokio::spawn(async move {
        let mut transport = FramedTransport::new(client, TransportConfig::default());
        run_session(&mut transport, &mut session).await
    });
    (server, handle)
}

// =========================================================================
// Scenarios
// =========================================================================

#[tokio::test]
async fn test_join_seat_duel_and_leave() {
    let (mut server, client) = start_client(ClientConfig::default(), Some(vec![111, 222])).await;

    // Opening: player info, then the join request.
    let (kind, body) = read_frame(&mut server).await;
    assert_eq!((kind, body.len()), (0x10, 40));
    assert_eq!(&body[..2], &[b'D', 0]);
    let (kind, body) = read_frame(&mut server).await;
    assert_eq!((kind, body.len()), (0x12, 52));

    send_frame(&mut server, 0x03, &[]).await;
    assert_eq!(read_frame(&mut server).await, (0x03, vec![1]));

    send_frame(&mut server, 0x12, &join_ack(1)).await;
    send_frame(&mut server, 0x13, &[0x13]).await;

    let (kind, body) = read_frame(&mut server).await;
    assert_eq!(kind, 0x02);
    let mut expected = Vec::new();
    for word in [2u32, 0, 111, 222] {
        expected.extend_from_slice(&word.to_le_bytes());
    }
    assert_eq!(body, expected);
    assert_eq!(read_frame(&mut server).await, (0x22, vec![]));

    send_frame(&mut server, 0x15, &[]).await;
    send_frame(&mut server, 0x04, &[]).await;
    assert_eq!(read_frame(&mut server).await, (0x04, vec![0]));

    // Two events and a chain prompt in one game message.
    let mut payload = RawCoreCodec::frame(40, &[0]);
    payload.extend(RawCoreCodec::frame(41, &[0, 1]));
    payload.extend(RawCoreCodec::frame(16, &[1, 0]));
    send_frame(&mut server, 0x01, &payload).await;
    assert_eq!(read_frame(&mut server).await, (0x01, (-1i32).to_le_bytes().to_vec()));

    send_frame(&mut server, 0x16, &[]).await;

    let end = client.await.unwrap().expect("clean end");
    assert!(end.is_clean());
    let seat = end.seat.expect("seated");
    assert_eq!((seat.index, seat.team, seat.duelist), (3, 1, 2));
}

#[tokio::test]
async fn test_room_full_ends_session() {
    let (mut server, client) = start_client(ClientConfig::default(), None).await;
    read_frame(&mut server).await;
    read_frame(&mut server).await;

    send_frame(&mut server, 0x12, &join_ack(3)).await;
    send_frame(&mut server, 0x13, &[0x07]).await;

    let end = client.await.unwrap().expect("orderly stop");
    assert_eq!(end.reason, StopReason::RoomFull { seat: 7 });
    assert!(!end.is_clean());
    assert!(end.seat.is_none());
}

#[tokio::test]
async fn test_server_hangup_is_transport_error() {
    let (mut server, client) = start_client(ClientConfig::default(), None).await;
    read_frame(&mut server).await;
    read_frame(&mut server).await;
    drop(server);

    let err = client.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        DeskbotError::Transport(TransportError::ConnectionClosed(_))
    ));
}
