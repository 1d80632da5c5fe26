/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

#![allow(dead_code)]

use async_trait::async_trait;
use kmlroute_core::{LatLng, PlaceId};
use kmlroute_processor::{LookupError, NearbyQuery, PlaceSearch};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A small published map: two populated folders, one empty, a style alias
/// chain, a dangling alias and two malformed placemarks.
pub const TOKYO_KML: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Tokyo Trip</name>
    <description>Places for the spring visit</description>
    <Style id="icon-1899-0288D1-normal">
      <IconStyle>
        <color>ffd18802</color>
        <Icon><href>https://example.com/icons/1899.png</href></Icon>
      </IconStyle>
    </Style>
    <Style id="icon-1899-0288D1-highlight">
      <IconStyle><color>ff000000</color></IconStyle>
    </Style>
    <Style id="icon-1577-A52714-nodesc-normal">
      <IconStyle>
        <color>ff1427a5</color>
        <Icon><href>https://example.com/icons/1577.png</href></Icon>
      </IconStyle>
    </Style>
    <StyleMap id="icon-1899-0288D1">
      <Pair><key>normal</key><styleUrl>#icon-1899-0288D1-normal</styleUrl></Pair>
      <Pair><key>highlight</key><styleUrl>#icon-1899-0288D1-highlight</styleUrl></Pair>
    </StyleMap>
    <StyleMap id="icon-1577-A52714-nodesc">
      <Pair><key>normal</key><styleUrl>#icon-1577-A52714-nodesc-normal</styleUrl></Pair>
    </StyleMap>
    <StyleMap id="icon-9-broken">
      <Pair><key>normal</key><styleUrl>#icon-9-missing-normal</styleUrl></Pair>
    </StyleMap>
    <Folder>
      <name>Food</name>
      <Placemark>
        <name>Ramen Ichiran</name>
        <description><![CDATA[Open late<br>PLACEID:ChIJramen]]></description>
        <styleUrl>#icon-1899-0288D1</styleUrl>
        <Point><coordinates>139.7005,35.6595,0</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>Sushi Dai</name>
        <styleUrl>#icon-1577-A52714-nodesc</styleUrl>
        <Point><coordinates>139.77,35.6655,0</coordinates></Point>
      </Placemark>
      <Placemark>
        <styleUrl>#icon-1899-0288D1</styleUrl>
        <Point><coordinates>139.70,35.66,0</coordinates></Point>
      </Placemark>
    </Folder>
    <Folder>
      <name>Sights</name>
      <Placemark>
        <name>Senso-ji</name>
        <description>Place ID: ChIJsensoji</description>
        <styleUrl>#icon-1899-0288D1</styleUrl>
        <Point><coordinates>139.7967,35.7148,0</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>Tokyo Tower</name>
        <description>Great view at night</description>
        <styleUrl>#icon-9-broken</styleUrl>
        <Point><coordinates>139.7454,35.6586,0</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>Nowhere</name>
        <styleUrl>#icon-1899-0288D1</styleUrl>
        <Point><coordinates>east,north</coordinates></Point>
      </Placemark>
    </Folder>
    <Folder>
      <name>Later</name>
    </Folder>
  </Document>
</kml>
"##;

pub const DOCUMENT_ID: &str = "mid-tokyo";

/// Labels of the options built from [`TOKYO_KML`], in order.
pub const TOKYO_LABELS: [&str; 5] = [
    "Current Location",
    "Ramen Ichiran",
    "Sushi Dai",
    "Senso-ji",
    "Tokyo Tower",
];

/// A `PlaceSearch` that answers from a script and records every query.
#[derive(Default)]
pub struct ScriptedSearch {
    answers: HashMap<String, Result<String, String>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<(String, LatLng)>>,
}

impl ScriptedSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(mut self, keyword: &str, id: &str) -> Self {
        self.answers.insert(keyword.to_string(), Ok(id.to_string()));
        self
    }

    pub fn failing(mut self, keyword: &str, status: &str) -> Self {
        self.answers
            .insert(keyword.to_string(), Err(status.to_string()));
        self
    }

    pub fn delayed(mut self, keyword: &str, delay: Duration) -> Self {
        self.delays.insert(keyword.to_string(), delay);
        self
    }

    /// Queries received so far, sorted by keyword.
    pub fn calls(&self) -> Vec<(String, LatLng)> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort_by(|a, b| a.0.cmp(&b.0));
        calls
    }

    pub fn keywords(&self) -> Vec<String> {
        self.calls().into_iter().map(|(k, _)| k).collect()
    }
}

#[async_trait]
impl PlaceSearch for ScriptedSearch {
    async fn nearby(&self, query: &NearbyQuery<'_>) -> Result<PlaceId, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.keyword.to_string(), query.location));

        if let Some(delay) = self.delays.get(query.keyword) {
            tokio::time::sleep(*delay).await;
        }

        match self.answers.get(query.keyword) {
            Some(Ok(id)) => PlaceId::new(id.as_str()).ok_or(LookupError::NoResults),
            Some(Err(status)) => Err(LookupError::Status(status.clone())),
            None => Err(LookupError::NoResults),
        }
    }
}

/// A raw HTTP/1.1 response with a body.
pub fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Accept one connection on a local port, read the request, then answer
/// with `response`, or hang up without a word when it is `None`.
pub async fn serve_once(response: Option<String>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request).await;
            if let Some(response) = response {
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        }
    });
    addr
}
