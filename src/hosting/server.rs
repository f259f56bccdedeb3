use super::Post;
use crate::protocol::Action;
use crate::sanitize;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::io::Lines;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Accepts joining players and pumps their lines into the room.
/// One task per connection; the room never touches a socket.
pub struct Server;

impl Server {
    pub async fn run(bind: String, posts: UnboundedSender<Post>) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&bind).await?;
        log::info!("listening on {}", bind);
        Self::attend(listener, posts).await
    }

    pub async fn attend(listener: TcpListener, posts: UnboundedSender<Post>) -> anyhow::Result<()> {
        loop {
            let (socket, addr) = listener.accept().await?;
            log::info!("connection from {}", addr);
            let posts = posts.clone();
            tokio::spawn(async move {
                if let Err(e) = Self::serve(socket, posts).await {
                    log::warn!("connection from {} dropped: {}", addr, e);
                }
            });
        }
    }

    /// Handshake is a single line naming the seat. Everything after
    /// that is the action stream, both ways.
    async fn serve(socket: TcpStream, posts: UnboundedSender<Post>) -> anyhow::Result<()> {
        let (read, write) = socket.into_split();
        let mut lines = BufReader::new(read).lines();
        let name = match lines.next_line().await? {
            Some(line) => sanitize(&line),
            None => return Ok(()),
        };
        if name.is_empty() {
            return Ok(());
        }
        let (tx, rx) = unbounded_channel::<String>();
        posts.send(Post::Rejoin(name.clone(), tx))?;
        let pumped = Self::pump(&name, &posts, lines, write, rx).await;
        // rx is gone by now, so the room sees this seat as closed
        let _ = posts.send(Post::Lost(name));
        pumped
    }

    async fn pump(
        name: &str,
        posts: &UnboundedSender<Post>,
        mut lines: Lines<BufReader<OwnedReadHalf>>,
        mut write: OwnedWriteHalf,
        mut rx: UnboundedReceiver<String>,
    ) -> anyhow::Result<()> {
        loop {
            tokio::select! {
                out = rx.recv() => match out {
                    Some(line) => {
                        write.write_all(line.as_bytes()).await?;
                        write.write_all(b"\n").await?;
                    }
                    // the room let go of this seat
                    None => return Ok(()),
                },
                got = lines.next_line() => match got? {
                    Some(line) => match Action::try_from(line.as_str()) {
                        Ok(Action::Noop) => log::warn!("unrecognized line from {}: {}", name, line),
                        Ok(action) => posts.send(Post::Wire(name.to_string(), action))?,
                        Err(e) => log::warn!("bad line from {}: {} ({})", name, line, e),
                    },
                    None => return Ok(()),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handshake_then_lines_become_posts() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, mut rx) = unbounded_channel();
        tokio::spawn(Server::attend(listener, tx));

        let mut socket = TcpStream::connect(addr).await.unwrap();
        socket.write_all(b"alice\n").await.unwrap();
        socket.write_all(b"DrawDomino;alice\n").await.unwrap();

        let seated = rx.recv().await.unwrap();
        let outbox = match seated {
            Post::Rejoin(name, outbox) => {
                assert_eq!(name, "alice");
                outbox
            }
            other => panic!("expected a handshake, got {:?}", other),
        };
        match rx.recv().await.unwrap() {
            Post::Wire(name, action) => {
                assert_eq!(name, "alice");
                assert_eq!(
                    action,
                    Action::DrawDomino {
                        player: "alice".to_string()
                    }
                );
            }
            other => panic!("expected a wire action, got {:?}", other),
        }

        // lines queued for the seat come out the socket newline-framed
        outbox.send("Noop".to_string()).unwrap();
        let mut reply = String::new();
        BufReader::new(socket).read_line(&mut reply).await.unwrap();
        assert_eq!(reply, "Noop\n");
    }

    #[tokio::test]
    async fn dropped_socket_reports_the_loss() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, mut rx) = unbounded_channel();
        tokio::spawn(Server::attend(listener, tx));

        let mut socket = TcpStream::connect(addr).await.unwrap();
        socket.write_all(b"bob\n").await.unwrap();
        match rx.recv().await.unwrap() {
            Post::Rejoin(name, _) => assert_eq!(name, "bob"),
            other => panic!("expected a handshake, got {:?}", other),
        }
        drop(socket);
        match rx.recv().await.unwrap() {
            Post::Lost(name) => assert_eq!(name, "bob"),
            other => panic!("expected a loss, got {:?}", other),
        }
    }
}
