use comfy_table::{presets::UTF8_BORDERS_ONLY, Table};
use mp_core::{
	domain::{Museum, UserMuseumData, UserMuseumRecord},
	state::UserData,
};

fn check(flag: bool) -> &'static str {
	if flag {
		"✓"
	} else {
		""
	}
}

fn location(museum: &Museum) -> String {
	match (&museum.city, &museum.country) {
		(Some(city), Some(country)) => format!("{city}, {country}"),
		(Some(place), None) | (None, Some(place)) => place.clone(),
		(None, None) => String::new(),
	}
}

/// One row per museum. Annotation columns only show up when `user_data` is given.
pub fn museums_table(museums: &[Museum], user_data: Option<&UserData>) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);

	let mut header = vec!["Name", "Location"];
	if user_data.is_some() {
		header.extend(["Visited", "Wish"]);
	}
	header.push("Id");
	table.set_header(header);

	for museum in museums {
		let mut row = vec![museum.name.clone(), location(museum)];
		if let Some(user_data) = user_data {
			let data = user_data.get(&museum.id).cloned().unwrap_or_default();
			row.push(check(data.visited).to_string());
			row.push(check(data.wish).to_string());
		}
		row.push(museum.id.clone());
		table.add_row(row);
	}

	table
}

/// Key/value view of a single museum and, when signed in, the user's take on it.
pub fn museum_detail_table(museum: &Museum, data: Option<&UserMuseumData>) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Field", "Value"]);

	table.add_row(vec!["Name", &museum.name]);
	table.add_row(vec!["Id", &museum.id]);
	for (field, value) in [
		("City", &museum.city),
		("Country", &museum.country),
		("Description", &museum.description),
		("Website", &museum.website),
		("Image", &museum.image),
		("Logo", &museum.logo),
	] {
		if let Some(value) = value {
			table.add_row(vec![field, value]);
		}
	}

	if let Some(data) = data {
		table.add_row(vec!["Visited", if data.visited { "yes" } else { "no" }]);
		table.add_row(vec!["Wish to visit", if data.wish { "yes" } else { "no" }]);
		if !data.notes.is_empty() {
			table.add_row(vec!["Notes", &data.notes]);
		}
	}

	table
}

pub fn record_table(record: &UserMuseumRecord) -> Table {
	let mut table = Table::new();
	table.load_preset(UTF8_BORDERS_ONLY);
	table.set_header(vec!["Museum", "Visited", "Wish", "Notes"]);
	table.add_row(vec![
		record.museum_id.as_str(),
		check(record.visited),
		check(record.wish),
		record.notes.as_str(),
	]);

	table
}

#[cfg(test)]
mod tests {
	use super::*;

	fn louvre() -> Museum {
		Museum {
			id: "http://www.wikidata.org/entity/Q19675".into(),
			name: "The Louvre".into(),
			city: Some("Paris".into()),
			country: Some("France".into()),
			..Default::default()
		}
	}

	#[test]
	fn annotation_columns_follow_user_data() {
		let anonymous = museums_table(&[louvre()], None).to_string();
		assert!(anonymous.contains("Paris, France"));
		assert!(!anonymous.contains("Visited"));

		let mut user_data = UserData::new();
		user_data.insert(
			louvre().id,
			UserMuseumData {
				visited: true,
				..Default::default()
			},
		);
		let signed_in = museums_table(&[louvre()], Some(&user_data)).to_string();
		assert!(signed_in.contains("Visited"));
		assert!(signed_in.contains('✓'));
	}

	#[test]
	fn detail_skips_missing_fields_and_shows_notes() {
		let data = UserMuseumData {
			wish: true,
			notes: "See the Winged Victory".into(),
			..Default::default()
		};
		let rendered = museum_detail_table(&louvre(), Some(&data)).to_string();

		assert!(rendered.contains("See the Winged Victory"));
		assert!(!rendered.contains("Website"));
	}
}
