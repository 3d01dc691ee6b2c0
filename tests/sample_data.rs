use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde::Deserialize;
use sheetgraph::{read, source};

#[derive(Debug, PartialEq, Deserialize)]
struct Customer {
	id: u64,
	name: String,
	age: u32,
	address: Address,
	phones: Vec<Phone>,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Address {
	zip_code: String,
	country: String,
	city: String,
}

#[derive(Debug, PartialEq, Deserialize)]
struct Phone {
	id: String,
	kind: String,
	number: String,
}

fn sample_source() -> source::Config {
	let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
	source::Config::Csv {
		paths: ["customer", "address", "phone"]
			.into_iter()
			.map(|name| data.join(format!("{name}.csv")))
			.collect(),
		delimiter: ',',
	}
}

#[test]
fn parse_sample_customers() {
	let workbook = source::load(&sample_source()).expect("sample data should load");
	let read = read::Read::new(read::Config::default());

	let customers = read
		.parse::<Customer>(&workbook, "customer")
		.expect("customers should parse");

	assert_eq!(customers.len(), 2);
	assert_eq!(customers[0].name, "customer1");
	assert_eq!(customers[0].age, 30);
	assert_eq!(
		customers[0].address,
		Address {
			zip_code: "12345".into(),
			country: "US".into(),
			city: "Springfield".into(),
		}
	);
	assert_eq!(
		customers[0]
			.phones
			.iter()
			.map(|phone| phone.number.as_str())
			.collect::<Vec<_>>(),
		vec!["555-0100", "555-0101"]
	);
	assert_eq!(customers[1].id, 2);
	assert_eq!(customers[1].phones[0].kind, "work");
}

#[test]
fn materialize_sample_addresses() {
	let workbook = source::load(&sample_source()).expect("sample data should load");
	let read = read::Read::new(read::Config::default());

	let addresses = read
		.sheet(&workbook, "address")
		.expect("addresses should materialize");

	let json = serde_json::to_value(&addresses).expect("serialization should not fail");
	assert_eq!(
		json,
		serde_json::json!([
			{"zipCode": "12345", "country": "US", "city": "Springfield"},
			{"zipCode": "67890", "country": "CA", "city": "Toronto"},
		])
	);
}
