//! Ready-made catalogs.
//!
//! Each function returns a fresh `Vec<Course>`; slices and vectors of
//! courses are catalog sources in `coursekb-engine`, so these can be passed
//! to the recommender directly.

use coursekb_core::Course;

use crate::course::CourseBuilder;

/// A small mixed catalog covering every category, language and price shape.
///
/// Course 9 has no rating, no subscribers and no length.
pub fn sample_catalog() -> Vec<Course> {
    vec![
        CourseBuilder::new("1")
            .title("Complete Python Bootcamp")
            .category("Development")
            .subcategory("Programming Languages")
            .language("English")
            .price(89.99)
            .rating(4.6)
            .subscribers(1_500_000)
            .reviews(450_000)
            .lectures(155)
            .minutes(1320)
            .build(),
        CourseBuilder::new("2")
            .title("Guitar for Beginners")
            .category("Music")
            .subcategory("Instruments")
            .language("English")
            .price(49.99)
            .rating(4.5)
            .subscribers(120_000)
            .reviews(20_000)
            .lectures(60)
            .minutes(480)
            .build(),
        CourseBuilder::new("3")
            .title("Piano Fundamentals")
            .category("Music")
            .subcategory("Instruments")
            .language("English")
            .price(0.0)
            .rating(4.2)
            .subscribers(80_000)
            .reviews(9_000)
            .lectures(40)
            .minutes(300)
            .build(),
        CourseBuilder::new("4")
            .title("Korean for Beginners")
            .category("Teaching & Academics")
            .subcategory("Language Learning")
            .language("Korean")
            .price(0.0)
            .rating(4.7)
            .subscribers(35_000)
            .reviews(4_000)
            .lectures(30)
            .minutes(240)
            .build(),
        CourseBuilder::new("5")
            .title("Web Design with Figma")
            .category("Design")
            .subcategory("Web Design")
            .language("English")
            .price(129.99)
            .rating(4.3)
            .subscribers(60_000)
            .reviews(7_500)
            .lectures(80)
            .minutes(600)
            .build(),
        CourseBuilder::new("6")
            .title("Data Science in Python")
            .category("Development")
            .subcategory("Data Science")
            .language("English")
            .price(199.99)
            .rating(4.8)
            .subscribers(400_000)
            .reviews(90_000)
            .lectures(200)
            .minutes(1800)
            .build(),
        CourseBuilder::new("7")
            .title("Intro to Photography")
            .category("Photography & Video")
            .subcategory("Digital Photography")
            .language("Spanish")
            .price(19.99)
            .rating(3.9)
            .subscribers(15_000)
            .reviews(1_200)
            .lectures(25)
            .minutes(150)
            .build(),
        CourseBuilder::new("8")
            .title("Rust Systems Programming")
            .category("Development")
            .subcategory("Programming Languages")
            .language("English")
            .price(59.99)
            .rating(4.9)
            .subscribers(25_000)
            .reviews(3_100)
            .lectures(90)
            .minutes(900)
            .build(),
        CourseBuilder::new("9")
            .title("Music Theory Basics")
            .category("Music")
            .subcategory("Music Fundamentals")
            .language("English")
            .lectures(12)
            .build(),
        CourseBuilder::new("10")
            .title("Java Masterclass")
            .category("Development")
            .subcategory("Programming Languages")
            .language("Korean")
            .price(99.99)
            .rating(4.1)
            .subscribers(50_000)
            .reviews(6_000)
            .lectures(120)
            .minutes(2400)
            .build(),
    ]
}

/// Three courses rated 4.4, 3.0 and 4.0 with 1000, 0 and 500 subscribers.
pub fn rating_ladder() -> Vec<Course> {
    vec![
        CourseBuilder::new("high").rating(4.4).subscribers(1000).build(),
        CourseBuilder::new("low").rating(3.0).subscribers(0).build(),
        CourseBuilder::new("mid").rating(4.0).subscribers(500).build(),
    ]
}

/// A catalog without any Music course.
///
/// When `with_korean` is true it contains a Korean-language Development
/// course, so dropping the category alone is enough to find results.
pub fn no_music_catalog(with_korean: bool) -> Vec<Course> {
    let mut courses = vec![
        CourseBuilder::new("dev-en")
            .category("Development")
            .language("English")
            .rating(4.5)
            .build(),
        CourseBuilder::new("design-en")
            .category("Design")
            .language("English")
            .rating(4.1)
            .build(),
    ];
    if with_korean {
        courses.push(
            CourseBuilder::new("dev-ko")
                .category("Development")
                .language("Korean")
                .rating(4.3)
                .build(),
        );
    }
    courses
}

/// Expensive, poorly rated courses that no bounded relaxation of a
/// "free and excellent" request can reach.
pub fn premium_catalog() -> Vec<Course> {
    vec![
        CourseBuilder::new("p1")
            .category("Business")
            .price(900.0)
            .rating(2.5)
            .subscribers(300)
            .build(),
        CourseBuilder::new("p2")
            .category("Business")
            .price(1200.0)
            .rating(2.0)
            .subscribers(9000)
            .build(),
        CourseBuilder::new("p3")
            .category("Finance")
            .price(950.0)
            .rating(1.5)
            .subscribers(4000)
            .build(),
    ]
}

/// Ids of `courses`, in order.
pub fn ids<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Vec<&'a str> {
    courses.into_iter().map(|c| c.id.as_str()).collect()
}
