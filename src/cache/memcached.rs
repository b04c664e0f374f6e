// src/cache/memcached.rs

//! Minimal memcached text-protocol client.
//!
//! Speaks just the `get`/`set` subset the response cache needs. Values are
//! stored with zero exptime (never expire).

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;

use crate::cache::CacheBackend;
use crate::error::{AppError, Result};

pub struct MemcacheClient<S = TcpStream> {
    stream: BufStream<S>,
}

impl MemcacheClient<TcpStream> {
    /// Connect to a memcached server, e.g. `localhost:11211`.
    pub async fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::from_stream(stream))
    }
}

impl<S> MemcacheClient<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin,
{
    /// Wrap an established connection.
    pub fn from_stream(stream: S) -> Self {
        Self {
            stream: BufStream::new(stream),
        }
    }

    /// Retrieve a value. `Ok(None)` on a miss.
    pub async fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.stream
            .write_all(format!("get {key}\r\n").as_bytes())
            .await?;
        self.stream.flush().await?;

        let header = self.read_line().await?;
        if header == "END" {
            return Ok(None);
        }

        // VALUE <key> <flags> <bytes> [<cas>]
        let mut tokens = header.split_whitespace();
        if tokens.next() != Some("VALUE") {
            return Err(AppError::cache(format!("unexpected reply: {header}")));
        }
        let size: usize = tokens
            .nth(2)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| AppError::cache(format!("bad VALUE header: {header}")))?;

        // data block plus its trailing CRLF
        let mut data = vec![0u8; size + 2];
        self.stream.read_exact(&mut data).await?;
        data.truncate(size);

        let end = self.read_line().await?;
        if end != "END" {
            return Err(AppError::cache(format!("missing END, got: {end}")));
        }

        String::from_utf8(data)
            .map(Some)
            .map_err(|e| AppError::cache(format!("non-UTF-8 cached value: {e}")))
    }

    /// Store a value with infinite TTL.
    pub async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let command = format!("set {key} 0 0 {}\r\n", value.len());
        self.stream.write_all(command.as_bytes()).await?;
        self.stream.write_all(value.as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        self.stream.flush().await?;

        let reply = self.read_line().await?;
        if reply != "STORED" {
            return Err(AppError::cache(format!("set not stored: {reply}")));
        }
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self.stream.read_line(&mut line).await?;
        if n == 0 {
            return Err(AppError::cache("connection closed by server".to_string()));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[async_trait]
impl<S> CacheBackend for MemcacheClient<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin,
{
    async fn fetch(&mut self, key: &str) -> Result<Option<String>> {
        self.get(key).await
    }

    async fn store(&mut self, key: &str, value: &str) -> Result<()> {
        self.set(key, value).await
    }
}
