//! libcurl easy-handle transport.

use super::{RequestOptions, Response, Transport};
use crate::error::UpdateError;
use curl::easy::Easy;

/// One fresh easy handle per request, peer verification always on.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: RequestOptions,
}

impl CurlTransport {
    pub fn new(opts: RequestOptions) -> Self {
        Self { opts }
    }

    fn handle(&self, url: &str) -> Result<Easy, curl::Error> {
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.opts.max_redirects)?;
        easy.fetch_filetime(true)?;
        easy.ssl_verify_peer(true)?;
        easy.ssl_verify_host(true)?;
        if let Some(ca) = &self.opts.ca_info {
            easy.cainfo(ca)?;
        }
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        Ok(easy)
    }

    fn perform(&self, url: &str, nobody: bool) -> Result<Response, UpdateError> {
        let fail = |e: curl::Error| UpdateError::transport(url, e);

        let mut easy = self.handle(url).map_err(fail)?;
        easy.nobody(nobody).map_err(fail)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(fail)?;
            transfer.perform().map_err(fail)?;
        }

        let code = easy.response_code().map_err(fail)?;
        if !(200..300).contains(&code) {
            return Err(UpdateError::transport(url, format!("HTTP {}", code)));
        }
        let filetime = easy.filetime().map_err(fail)?;
        tracing::debug!(
            "{} {} -> HTTP {}, {} bytes, filetime {:?}",
            if nobody { "HEAD" } else { "GET" },
            url,
            code,
            body.len(),
            filetime
        );

        Ok(Response { body, filetime })
    }
}

impl Transport for CurlTransport {
    fn get(&mut self, url: &str) -> Result<Response, UpdateError> {
        self.perform(url, false)
    }

    fn head(&mut self, url: &str) -> Result<Response, UpdateError> {
        self.perform(url, true)
    }
}
