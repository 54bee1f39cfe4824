//! Built-in showcase links served by `GET /links/random`.

use chrono::Utc;
use rand::seq::SliceRandom;

use super::types::{Link, LinkValues};

/// Slug reported for showcase links.
pub const SHOWCASE_SLUG: &str = "random";

struct ShowcaseEntry {
    title: &'static str,
    description: &'static str,
    site_name: &'static str,
    kind: &'static str,
    url: &'static str,
    image: &'static str,
}

const SHOWCASE: &[ShowcaseEntry] = &[
    ShowcaseEntry {
        title: "Sharknado (TV Movie 2013)",
        description: "Directed by Anthony C. Ferrante.  With Ian Ziering, Tara Reid, John Heard, Cassandra Scerbo. When a freak hurricane swamps Los Angeles, nature's deadliest killer rules sea, land, and air as thousands of sharks terrorize the waterlogged populace.",
        site_name: "IMDb",
        kind: "video.movie",
        url: "http://www.imdb.com/title/tt2724064/",
        image: "https://images-na.ssl-images-amazon.com/images/M/MV5BOTE2OTk4MTQzNV5BMl5BanBnXkFtZTcwODUxOTM3OQ@@._V1_SY1000_CR0,0,712,1000_AL_.jpg",
    },
    ShowcaseEntry {
        title: "Bloodhound Gang - The Bad Touch",
        description: "Music video by Bloodhound Gang performing The Bad Touch. (C) 1999 Interscope Records",
        site_name: "YouTube",
        kind: "video",
        url: "https://www.youtube.com/watch?v=xat1GVnl8-k",
        image: "https://i.ytimg.com/vi/xat1GVnl8-k/hqdefault.jpg",
    },
    ShowcaseEntry {
        title: "EuroTrip (2004)",
        description: "Directed by Jeff Schaffer, Alec Berg, David Mandel.  With Scott Mechlowicz, Jacob Pitts, Michelle Trachtenberg, Travis Wester. Dumped by his girlfriend, a high school grad decides to embark on an overseas adventure in Europe with his friends.",
        site_name: "IMDb",
        kind: "video.movie",
        url: "http://www.imdb.com/title/tt0356150/",
        image: "https://images-na.ssl-images-amazon.com/images/M/MV5BMTIxNjcxMDUxN15BMl5BanBnXkFtZTYwNjAxNTM3._V1_.jpg",
    },
    ShowcaseEntry {
        title: "Ali G Indahouse (2002)",
        description: "Directed by Mark Mylod.  With Sacha Baron Cohen, Emilio Rivera, Gina La Piana, Dana de Celis. Ali G unwittingly becomes a pawn in the evil Chancellor's plot to overthrow the Prime Minister of Great Britain. However, instead of bringing the Prime Minister down, Ali is embraced by the nation as the voice of youth and 'realness', making the Prime Minister and his government more popular than ever.",
        site_name: "IMDb",
        kind: "video.movie",
        url: "http://www.imdb.com/title/tt0284837/",
        image: "https://images-na.ssl-images-amazon.com/images/M/MV5BMTgxMTA5YmYtNTE0MC00Mzk1LWJkNTUtZjJiYzBjYjdlYTM4XkEyXkFqcGdeQXVyNTIzOTk5ODM@._V1_SY1000_CR0,0,675,1000_AL_.jpg",
    },
    ShowcaseEntry {
        title: "Kakapo.js",
        description: "A bunch of colleagues writing about swift, javascript, ruby, go, algorithms, performance and coding stories",
        site_name: "DevLucky",
        kind: "website",
        url: "http://devlucky.github.io/kakapo-js",
        image: "http://devlucky.github.io/assets/images/logo.png",
    },
];

impl ShowcaseEntry {
    fn to_values(&self) -> LinkValues {
        LinkValues {
            title: self.title.to_string(),
            description: self.description.to_string(),
            site_name: self.site_name.to_string(),
            kind: self.kind.to_string(),
            url: self.url.to_string(),
            image: Some(self.image.to_string()),
        }
    }
}

/// All showcase values, in a fixed order.
#[must_use]
pub fn showcase_values() -> Vec<LinkValues> {
    SHOWCASE.iter().map(ShowcaseEntry::to_values).collect()
}

/// A link built from a randomly picked showcase entry.
#[must_use]
pub fn random_link() -> Link {
    let entry = SHOWCASE
        .choose(&mut rand::thread_rng())
        .unwrap_or(&SHOWCASE[0]);

    Link {
        slug: SHOWCASE_SLUG.to_string(),
        values: entry.to_values(),
        hosted_image: false,
        created_at: Utc::now(),
    }
}
