#![allow(dead_code)]

use std::{
    io::{Read, Write},
    net::TcpListener,
    path::{Path, PathBuf},
    thread::JoinHandle,
    time::Duration,
};

use image::{Delay, Frame, Rgb, RgbImage, Rgba, RgbaImage, codecs::gif::GifEncoder};

/// Fresh, empty scratch directory under `target/`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("it").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Distinct opaque color for frame `i`.
pub fn frame_color(i: u32) -> [u8; 3] {
    let i = i as u8;
    [i.wrapping_mul(10), 255 - i.wrapping_mul(9), i.wrapping_mul(37)]
}

/// Frame `i`: solid [`frame_color`] with a white marker pixel in its top-left corner.
pub fn test_frame(i: u32, w: u32, h: u32) -> RgbImage {
    let mut img = RgbImage::from_pixel(w, h, Rgb(frame_color(i)));
    img.put_pixel(0, 0, Rgb([255, 255, 255]));
    img
}

pub fn gif_bytes(count: u32, w: u32, h: u32) -> Vec<u8> {
    rgba_gif_bytes((0..count).map(|i| {
        let rgb = test_frame(i, w, h);
        RgbaImage::from_fn(w, h, |x, y| {
            let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
            Rgba([r, g, b, 255])
        })
    }))
}

pub fn rgba_gif_bytes(frames: impl IntoIterator<Item = RgbaImage>) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut enc = GifEncoder::new(&mut out);
        let frames = frames
            .into_iter()
            .map(|rgba| Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(40, 1)));
        enc.encode_frames(frames).unwrap();
    }
    out
}

pub fn write_gif(path: &Path, count: u32, w: u32, h: u32) {
    std::fs::write(path, gif_bytes(count, w, h)).unwrap();
}

/// Serve exactly one HTTP response on 127.0.0.1 and return the URL to request.
pub fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let head = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: image/gif\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
    });

    (format!("http://{addr}/anim.gif"), handle)
}

/// Accept one connection and hold it open for `hold` without ever answering.
pub fn stall_once(hold: Duration) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let (_stream, _) = listener.accept().unwrap();
        std::thread::sleep(hold);
    });

    (format!("http://{addr}/slow.gif"), handle)
}

/// URL on a loopback port nobody is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/gone.gif")
}

/// Loader whose client ignores proxy environment variables, so loopback requests stay local.
pub fn local_loader() -> gif_grid::Loader {
    local_loader_with(gif_grid::LoadOptions::default())
}

pub fn local_loader_with(options: gif_grid::LoadOptions) -> gif_grid::Loader {
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    gif_grid::Loader::new(options).with_client(client)
}
