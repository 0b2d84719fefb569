use chrono::{DateTime, Duration, FixedOffset, Utc};
use rand::{Rng, seq::IndexedRandom};

const METHODS: [(&str, u8); 6] = [
    ("GET", 60),
    ("POST", 15),
    ("HEAD", 5),
    ("PUT", 3),
    ("DELETE", 2),
    ("-", 2),
];
const PATHS: [(&str, u8); 7] = [
    ("/", 20),
    ("/index.html", 10),
    ("/login", 10),
    ("/api/v1/items", 30),
    ("/robots.txt", 5),
    ("/sitemap.xml", 5),
    ("/wp-login.php", 3),
];
const STATUS: [(u16, u8); 7] = [
    (200, 60),
    (301, 5),
    (304, 5),
    (400, 3),
    (403, 2),
    (404, 20),
    (500, 2),
];
const AGENTS: [(&str, u8); 8] = [
    (
        "Mozilla/5.0 (X11; Linux x86_64; rv:118.0) Gecko/20100101 Firefox/118.0",
        30,
    ),
    (
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0 Safari/537.36",
        30,
    ),
    (
        "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
        12,
    ),
    (
        "Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)",
        8,
    ),
    (
        "Mozilla/5.0 (compatible; AhrefsBot/7.0; +http://ahrefs.com/robot/)",
        5,
    ),
    ("DuckDuckBot/1.1; (+http://duckduckgo.com/duckduckbot.html)", 3),
    ("curl/8.4.0", 10),
    ("-", 2),
];
const REFERRERS: [(&str, u8); 3] = [
    ("-", 70),
    ("https://example.com/", 20),
    ("https://www.google.com/", 10),
];
// +0000, +0200, -0500, +0530
const OFFSETS: [i32; 4] = [0, 2 * 3600, -5 * 3600, 5 * 3600 + 1800];
const GARBAGE: [&str; 5] = [
    "",
    "-",
    "GET / HTTP/1.1",
    r#"10.0.0.1 - - [99/Xyz/2023:00:00:00 +0000] "GET / HTTP/1.1" 200 1 "-" "-" "-""#,
    r#"10.0.0.1 - - [10/Oct/2023:00:00:00 +0000] "GET / HTTP/1.1" 200 1 "-" "-""#,
];

fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, choices: &'a [(T, u8)]) -> &'a T {
    &choices
        .choose_weighted(rng, |(_, w)| *w)
        .expect("non-empty weighted table")
        .0
}

/// One well-formed combined log line with a timestamp inside `[end - span, end]`.
pub fn generate_access_log<R: Rng + ?Sized>(
    rng: &mut R,
    end: DateTime<Utc>,
    span: Duration,
) -> String {
    let ip = format!(
        "192.168.{}.{}",
        rng.random_range(0..256),
        rng.random_range(0..256)
    );
    let back = rng.random_range(0..=span.num_seconds().max(0));
    let offset = FixedOffset::east_opt(*OFFSETS.choose(rng).expect("non-empty offsets"))
        .expect("offset within a day");
    let timestamp = (end - Duration::seconds(back))
        .with_timezone(&offset)
        .format("%d/%b/%Y:%H:%M:%S %z");
    let request = match *pick(rng, &METHODS) {
        "-" => "-".to_string(),
        method => format!("{method} {} HTTP/1.1", pick(rng, &PATHS)),
    };
    let status = pick(rng, &STATUS);
    let size = if *status == 304 {
        "-".to_string()
    } else {
        rng.random_range(100..20_000).to_string()
    };
    let referrer = pick(rng, &REFERRERS);
    let agent = pick(rng, &AGENTS);

    format!(r#"{ip} - - [{timestamp}] "{request}" {status} {size} "{referrer}" "{agent}" "-""#)
}

/// A line the analyzer is expected to reject.
pub fn generate_garbage<R: Rng + ?Sized>(rng: &mut R) -> String {
    GARBAGE.choose(rng).expect("non-empty garbage").to_string()
}
