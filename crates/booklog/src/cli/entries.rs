//! Fields shared by `add` and `edit`.

use clap::Args;

use booklog_core::book::{CreateEntryRequest, EntryError, Genre, TimeScaleDot};

/// The book form.
#[derive(Debug, Clone, Args)]
pub struct EntryFields {
    /// Book title.
    #[arg(long)]
    pub title: String,
    /// Book author.
    #[arg(long)]
    pub author: String,
    /// Year the book was published.
    #[arg(long)]
    pub publication_year: Option<String>,
    /// Year you read it.
    #[arg(long)]
    pub year_read: Option<String>,
    /// Genre tag, by display name. Repeat for several.
    #[arg(long = "genre")]
    pub genres: Vec<Genre>,
    /// Mark as a favorite.
    #[arg(long)]
    pub favorite: bool,
    /// Free-form notes.
    #[arg(long)]
    pub thoughts: Option<String>,
    /// Latitude of the place the book is tied to.
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    pub latitude: Option<String>,
    /// Longitude of the place the book is tied to.
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    pub longitude: Option<String>,
    /// Time scale position, as a fraction of the image width.
    #[arg(long, requires = "dot_y")]
    pub dot_x: Option<f64>,
    /// Time scale position, as a fraction of the image height.
    #[arg(long, requires = "dot_x")]
    pub dot_y: Option<f64>,
}

impl EntryFields {
    pub fn into_request(self) -> Result<CreateEntryRequest, EntryError> {
        let time_scale_dot = match (self.dot_x, self.dot_y) {
            (Some(x), Some(y)) => Some(TimeScaleDot::new(x, y)?),
            _ => None,
        };

        Ok(CreateEntryRequest {
            title: self.title,
            author: self.author,
            publication_year: self.publication_year,
            year_read: self.year_read,
            genres: self.genres.into_iter().collect(),
            favorite: self.favorite,
            thoughts: self.thoughts,
            latitude: self.latitude,
            longitude: self.longitude,
            time_scale_dot,
        })
    }
}
