use crate::model::{LearningResource, RecyclingCenter, ReferenceData, WasteType};
use chrono::{DateTime, Utc};

fn waste_type(
    id: u32,
    name: &str,
    description: &str,
    is_recyclable: bool,
    disposal_instructions: &str,
    category: &str,
    color_class: &str,
) -> WasteType {
    WasteType {
        id,
        name: name.into(),
        description: description.into(),
        is_recyclable,
        disposal_instructions: disposal_instructions.into(),
        category: category.into(),
        color_class: color_class.into(),
    }
}

fn resource(
    id: u32,
    title: &str,
    description: &str,
    image: &str,
    category: &str,
    category_color: &str,
    created_at: DateTime<Utc>,
) -> LearningResource {
    LearningResource {
        id,
        title: title.into(),
        description: description.into(),
        content: format!("Detailed content about {}...", title.to_lowercase()),
        image: format!(
            "https://images.unsplash.com/{image}?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80"
        ),
        category: category.into(),
        category_color: category_color.into(),
        created_at,
    }
}

#[allow(clippy::too_many_arguments)]
fn center(
    id: u32,
    name: &str,
    address: &str,
    latitude: f64,
    longitude: f64,
    phone: &str,
    website: &str,
    hours: &str,
    waste_types: &[&str],
) -> RecyclingCenter {
    RecyclingCenter {
        id,
        name: name.into(),
        address: address.into(),
        latitude,
        longitude,
        phone: Some(phone.into()),
        website: Some(website.into()),
        hours_of_operation: Some(hours.into()),
        waste_types: waste_types.iter().map(|s| s.to_string()).collect(),
    }
}

/// Built-in reference data. Learning resources are stamped with `seeded_at`.
pub fn default_reference_data(seeded_at: DateTime<Utc>) -> ReferenceData {
    let waste_types = vec![
        waste_type(1, "Plastic", "Various plastic items including bottles, containers, and packaging.", true,
            "Clean and place in recycling bin. Check resin identification code (1-7) to verify recyclability.", "Recycling", "primary"),
        waste_type(2, "Paper", "Paper products including cardboard, newspapers, magazines, and office paper.", true,
            "Remove any plastic or metal components. Flatten cardboard boxes.", "Recycling", "secondary"),
        waste_type(3, "Glass", "Glass bottles and jars of various colors.", true,
            "Rinse containers and remove lids or caps. Sort by color if required.", "Recycling", "accent"),
        waste_type(4, "Metal", "Metal cans, aluminum foil, and other metal items.", true,
            "Clean and remove labels if possible. Separate different metal types.", "Recycling", "secondary"),
        waste_type(5, "Organic", "Food scraps, yard waste, and other biodegradable materials.", true,
            "Compost in a home system or municipal collection program.", "Composting", "primary"),
        waste_type(6, "Electronic", "Electronic devices, batteries, and components.", true,
            "Take to designated e-waste collection centers or retailer take-back programs.", "E-Waste", "secondary"),
        waste_type(7, "Hazardous", "Chemicals, paints, solvents, and other potentially dangerous materials.", false,
            "Take to hazardous waste facilities. Never dispose in regular trash.", "Hazardous", "accent"),
        waste_type(8, "Yard Waste", "Leaves, branches, grass clippings, and other garden waste.", true,
            "Compost or use municipal yard waste collection services.", "Composting", "accent"),
        waste_type(9, "Batteries", "Household batteries including alkaline, lithium, and rechargeable types.", true,
            "Take to battery recycling collection points. Do not dispose in regular trash.", "E-Waste", "accent"),
    ];

    let learning_resources = vec![
        resource(1, "Plastic Recycling Guide",
            "Learn about different types of plastic and how to properly recycle each type based on the resin identification code.",
            "photo-1604187351574-c75ca79f5807", "Guide", "primary", seeded_at),
        resource(2, "Composting 101",
            "Discover how to start your own composting system at home and turn kitchen scraps into valuable soil amendments.",
            "photo-1542601906990-b4d3fb778b09", "Tutorial", "accent", seeded_at),
        resource(3, "E-Waste Management",
            "Learn the proper disposal methods for electronic waste and why it's critical to keep these items out of landfills.",
            "photo-1530587191325-3db32d826c18", "Info", "secondary", seeded_at),
        resource(4, "Reducing Single-Use Plastics",
            "Practical tips for reducing your reliance on single-use plastics in everyday life.",
            "photo-1605600659873-d808a13e4aba", "Tips", "primary", seeded_at),
        resource(5, "Understanding Waste Symbols",
            "A guide to common recycling and waste disposal symbols found on packaging.",
            "photo-1532996122724-e3c354a0b15b", "Guide", "secondary", seeded_at),
        resource(6, "Hazardous Waste Safety",
            "How to identify, handle, and properly dispose of hazardous household waste.",
            "photo-1611284446314-60a58ac0deb9", "Safety", "accent", seeded_at),
    ];

    let recycling_centers = vec![
        center(1, "EcoCycle Recycling Center", "123 Green Street, Eco City", 37.7749, -122.4194,
            "(555) 123-4567", "https://www.ecocycle.com", "Monday-Friday: 8am-6pm, Saturday: 9am-4pm",
            &["Plastic", "Paper", "Glass"]),
        center(2, "GreenTech Composting", "456 Earth Avenue, Eco City", 37.7850, -122.4300,
            "(555) 234-5678", "https://www.greentech.com", "Monday-Friday: 7am-5pm, Saturday: 8am-2pm",
            &["Organic", "Yard Waste"]),
        center(3, "TechRecycle Solutions", "789 Circuit Drive, Eco City", 37.7695, -122.4100,
            "(555) 345-6789", "https://www.techrecycle.com", "Monday-Saturday: 9am-6pm",
            &["Electronic", "Batteries"]),
        center(4, "Metro Hazardous Waste Facility", "101 Safety Boulevard, Eco City", 37.7600, -122.4250,
            "(555) 456-7890", "https://www.metrohazardous.com", "Tuesday-Saturday: 10am-5pm",
            &["Hazardous", "Electronic", "Batteries"]),
        center(5, "Community Recycling Hub", "202 Neighborhood Lane, Eco City", 37.7900, -122.4000,
            "(555) 567-8901", "https://www.communityrecycling.org", "Monday-Sunday: 8am-8pm",
            &["Plastic", "Paper", "Glass", "Metal"]),
    ];

    ReferenceData {
        waste_types,
        learning_resources,
        recycling_centers,
    }
}
