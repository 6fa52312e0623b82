use std::io::{self, BufRead, BufReader, Write};
use std::net::TcpStream;

/**
 * Newline-delimited UTF-8 framing over a TCP stream. There is no length
 * prefix and no versioning; one line is one message. The wrapper owns
 * both directions of the connection, so dropping it closes this peer's
 * end on every exit path of the exchange.
 */
pub struct LineStream {
    ///Buffered read half of the stream.
    reader: BufReader<TcpStream>,

    ///Write half of the stream.
    writer: TcpStream,
}

impl LineStream {
    /**
     * Wraps an established stream for line exchange.
     *
     * # Arguments
     *
     * `stream` - TCP stream between the peers.
     */
    pub fn new(stream: TcpStream) -> io::Result<LineStream> {
        let writer = stream.try_clone()?;

        Ok(LineStream {
            reader: BufReader::new(stream),
            writer,
        })
    }

    /**
     * Receives one newline-terminated message. Returns None when the
     * other peer closed the connection.
     */
    pub fn recv_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read_bytes = self.reader.read_line(&mut line)?;

        if read_bytes == 0 {
            return Ok(None);
        }

        //Stripping the line terminator
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }

        Ok(Some(line))
    }

    /**
     * Sends one message followed by the line terminator and flushes it.
     *
     * # Arguments
     *
     * `message` - Message text without the terminator.
     */
    pub fn send_line(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(message.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
