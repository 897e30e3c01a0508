use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader, Cursor, Seek},
    path::Path,
    time::Duration,
};

use image::{
    AnimationDecoder, DynamicImage, Frame, Frames, ImageFormat, ImageReader,
    codecs::{
        gif::GifDecoder,
        png::{ApngDecoder, PngDecoder},
        webp::WebPDecoder,
    },
};

use crate::{
    error::{GridResult, LoadError},
    source::SourceRef,
};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Byte stream a [`DecodedImage`] pulls frames from.
pub trait SourceReader: BufRead + Seek {}

impl<T: BufRead + Seek> SourceReader for T {}

type BoxedReader = Box<dyn SourceReader>;

enum FrameSource {
    Gif(GifDecoder<BoxedReader>),
    Apng(ApngDecoder<BoxedReader>),
    WebP(WebPDecoder<BoxedReader>),
    Still(DynamicImage),
}

/// Decoded (but not yet iterated) image. Frame data is produced lazily by [`DecodedImage::frames`].
pub struct DecodedImage {
    origin: String,
    format: ImageFormat,
    source: FrameSource,
}

impl DecodedImage {
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<String>) -> Result<Self, LoadError> {
        Self::from_reader(Cursor::new(bytes), origin)
    }

    pub fn from_reader<R: BufRead + Seek + 'static>(
        reader: R,
        origin: impl Into<String>,
    ) -> Result<Self, LoadError> {
        let origin = origin.into();
        let boxed: BoxedReader = Box::new(reader);

        let reader = ImageReader::new(boxed)
            .with_guessed_format()
            .map_err(|source| LoadError::Read {
                origin: origin.clone(),
                source,
            })?;
        let Some(format) = reader.format() else {
            return Err(LoadError::UnknownFormat { origin });
        };
        tracing::debug!(?format, %origin, "detected image format");

        let decode_err = |source| LoadError::Decode {
            origin: origin.clone(),
            source,
        };
        let inner = reader.into_inner();
        let source = match format {
            ImageFormat::Gif => FrameSource::Gif(GifDecoder::new(inner).map_err(decode_err)?),
            ImageFormat::Png => {
                let png = PngDecoder::new(inner).map_err(decode_err)?;
                if png.is_apng().map_err(decode_err)? {
                    FrameSource::Apng(png.apng().map_err(decode_err)?)
                } else {
                    FrameSource::Still(DynamicImage::from_decoder(png).map_err(decode_err)?)
                }
            }
            ImageFormat::WebP => {
                let webp = WebPDecoder::new(inner).map_err(decode_err)?;
                if webp.has_animation() {
                    FrameSource::WebP(webp)
                } else {
                    FrameSource::Still(DynamicImage::from_decoder(webp).map_err(decode_err)?)
                }
            }
            other => {
                let mut still = ImageReader::new(inner);
                still.set_format(other);
                FrameSource::Still(still.decode().map_err(decode_err)?)
            }
        };

        Ok(Self {
            origin,
            format,
            source,
        })
    }

    /// Path or URL the image was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn is_animated(&self) -> bool {
        !matches!(self.source, FrameSource::Still(_))
    }

    /// Frames in their native order. Still images yield exactly one frame.
    pub fn frames(self) -> Frames<'static> {
        match self.source {
            FrameSource::Gif(d) => d.into_frames(),
            FrameSource::Apng(d) => d.into_frames(),
            FrameSource::WebP(d) => d.into_frames(),
            FrameSource::Still(img) => Frames::new(Box::new(std::iter::once(Ok(Frame::new(
                img.into_rgba8(),
            ))))),
        }
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("origin", &self.origin)
            .field("format", &self.format)
            .field("animated", &self.is_animated())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Upper bound on the whole remote request, body included.
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Resolves a [`SourceRef`] into a [`DecodedImage`].
#[derive(Clone, Debug, Default)]
pub struct Loader {
    options: LoadOptions,
    client: Option<reqwest::blocking::Client>,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            client: None,
        }
    }

    /// Use a pre-configured HTTP client (proxy, TLS roots, ...) for remote sources.
    pub fn with_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    #[tracing::instrument(skip(self))]
    pub fn load(&self, source: &SourceRef) -> Result<DecodedImage, LoadError> {
        match source {
            SourceRef::Url(url) => {
                let bytes = self.fetch(url)?;
                DecodedImage::from_bytes(bytes, url.as_str())
            }
            SourceRef::Path(path) => Self::open(path),
        }
    }

    fn open(path: &Path) -> Result<DecodedImage, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let origin = path.display().to_string();
        let file = File::open(path).map_err(|source| LoadError::Read {
            origin: origin.clone(),
            source,
        })?;
        DecodedImage::from_reader(BufReader::new(file), origin)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let request_err = |source| LoadError::Request {
            url: url.to_owned(),
            source,
        };

        let built;
        let client = match &self.client {
            Some(client) => client,
            None => {
                built = reqwest::blocking::Client::builder()
                    .build()
                    .map_err(request_err)?;
                &built
            }
        };

        let response = client
            .get(url)
            .timeout(self.options.timeout)
            .send()
            .map_err(request_err)?;

        let status = response.status();
        tracing::debug!(%status, "remote source responded");
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_owned(),
                status,
            });
        }

        let body = response.bytes().map_err(request_err)?;
        tracing::debug!(bytes = body.len(), "remote source downloaded");
        Ok(body.to_vec())
    }
}

/// Parse `source` and load it with default options.
pub fn load_image(source: &str) -> GridResult<DecodedImage> {
    let source = SourceRef::parse(source)?;
    Ok(Loader::default().load(&source)?)
}
