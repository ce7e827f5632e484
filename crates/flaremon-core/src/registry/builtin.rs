// Built-in location table
//
// Cloudflare data-center codes known at build time, as (code, display name,
// region). Loaded into the registry with `Provenance::BuiltIn`; the status
// feed adds anything newer at runtime.

pub(super) const BUILTIN_LOCATIONS: &[(&str, &str, &str)] = &[
    ("AKL", "Auckland, New Zealand", "Oceania"),
    ("AMS", "Amsterdam, Netherlands", "Europe"),
    ("ARN", "Stockholm, Sweden", "Europe"),
    ("ATH", "Athens, Greece", "Europe"),
    ("ATL", "Atlanta, GA, United States", "North America"),
    ("BCN", "Barcelona, Spain", "Europe"),
    ("BEG", "Belgrade, Serbia", "Europe"),
    ("BEY", "Beirut, Lebanon", "Middle East"),
    ("BKK", "Bangkok, Thailand", "Asia"),
    ("BNA", "Nashville, TN, United States", "North America"),
    ("BNE", "Brisbane, QLD, Australia", "Oceania"),
    ("BOM", "Mumbai, India", "Asia"),
    ("BOS", "Boston, MA, United States", "North America"),
    ("BRU", "Brussels, Belgium", "Europe"),
    ("BUD", "Budapest, HU", "Europe"),
    ("CAI", "Cairo, Egypt", "Africa"),
    ("CAN", "Guangzhou, China", "Asia"),
    ("CDG", "Paris, France", "Europe"),
    ("CGO", "Zhengzhou, China", "Asia"),
    ("CMB", "Colombo, Sri Lanka", "Asia"),
    ("CPH", "Copenhagen, Denmark", "Europe"),
    ("CPT", "Cape Town, South Africa", "Africa"),
    ("CSX", "Zuzhou, China", "Asia"),
    ("CTU", "Chengdu, China", "Asia"),
    ("CUR", "Willemstad, Curaçao", "Latin America & the Caribbean"),
    ("DEL", "New Delhi, India", "Asia"),
    ("DEN", "Denver, CO, United States", "North America"),
    ("DFW", "Dallas, TX, United States", "North America"),
    ("DME", "Moscow, Russia", "Europe"),
    ("DOH", "Doha, Qatar", "Middle East"),
    ("DTW", "Detroit, MI, United States", "North America"),
    ("DUB", "Dublin, Ireland", "Europe"),
    ("DUS", "Düsseldorf, Germany", "Europe"),
    ("DXB", "Dubai, United Arab Emirates", "Middle East"),
    ("EVN", "Yerevan, Armenia", "Asia"),
    ("EWR", "Newark, NJ, United States", "North America"),
    ("EZE", "Buenos Aires, Argentina", "Latin America & the Caribbean"),
    ("FCO", "Rome, Italy", "Europe"),
    ("FOC", "Fuzhou, China", "Asia"),
    ("FRA", "Frankfurt, Germany", "Europe"),
    ("FUO", "Foshan, China", "Asia"),
    ("GIG", "Rio de Janeiro, Brazil", "Latin America & the Caribbean"),
    ("GRU", "São Paulo, Brazil", "Latin America & the Caribbean"),
    ("HAM", "Hamburg, Germany", "Europe"),
    ("HEL", "Helsinki, Finland", "Europe"),
    ("HGH", "Hangzhou, China", "Asia"),
    ("HKG", "Hong Kong, Hong Kong", "Asia"),
    ("HNY", "Hengyang, China", "Asia"),
    ("IAD", "Ashburn, VA, United States", "North America"),
    ("ICN", "Seoul, South Korea", "Asia"),
    ("IND", "Indianapolis, IN, United States", "North America"),
    ("JIB", "Djibouti City, Djibouti", "Africa"),
    ("JNB", "Johannesburg, South Africa", "Africa"),
    ("KBP", "Kiev, Ukraine", "Europe"),
    ("KIX", "Osaka, Japan", "Asia"),
    ("KTM", "Kathmandu, Nepal", "Asia"),
    ("KUL", "Kuala Lumpur, Malaysia", "Asia"),
    ("KWI", "Kuwait City, Kuwait", "Middle East"),
    ("LAD", "Luanda, Angola", "Africa"),
    ("LAS", "Las Vegas, NV, United States", "North America"),
    ("LAX", "Los Angeles, CA, United States", "North America"),
    ("LHR", "London, United Kingdom", "Europe"),
    ("LIM", "Lima, Peru", "Latin America & the Caribbean"),
    ("LIS", "Lisbon, Portugal", "Europe"),
    ("LYA", "Luoyang, China", "Asia"),
    ("MAA", "Chennai, India", "Asia"),
    ("MAD", "Madrid, Spain", "Europe"),
    ("MAN", "Manchester, United Kingdom", "Europe"),
    ("MBA", "Mombasa, Kenya", "Africa"),
    ("MCI", "Kansas City, MO, United States", "North America"),
    ("MCT", "Muscat, Oman", "Middle East"),
    ("MDE", "Medellín, Columbia", "Latin America & the Caribbean"),
    ("MEL", "Melbourne, VIC, Australia", "Oceania"),
    ("MFE", "McAllen, TX, United States", "North America"),
    ("MIA", "Miami, FL, United States", "North America"),
    ("MNL", "Manila, Philippines", "Asia"),
    ("MRS", "Marseille, France", "Europe"),
    ("MRU", "Port Louis, Mauritius", "Africa"),
    ("MSP", "Minneapolis, MN, United States", "North America"),
    ("MUC", "Munich, Germany", "Europe"),
    ("MXP", "Milan, Italy", "Europe"),
    ("NAY", "Langfang, China", "Asia"),
    ("NNG", "Nanning, China", "Asia"),
    ("NRT", "Tokyo, Japan", "Asia"),
    ("OMA", "Omaha, NE, United States", "North America"),
    ("ORD", "Chicago, IL, United States", "North America"),
    ("OSL", "Oslo, Norway", "Europe"),
    ("OTP", "Bucharest, Romania", "Europe"),
    ("PDX", "Portland, OR, United States", "North America"),
    ("PER", "Perth, WA, Australia", "Oceania"),
    ("PHX", "Phoenix, AZ, United States", "North America"),
    ("PIT", "Pittsburgh, PA, United States", "North America"),
    ("PNH", "Phnom Penh, Cambodia", "Asia"),
    ("PRG", "Prague, Czech Republic", "Europe"),
    ("PTY", "Panama City, Panama", "Latin America & the Caribbean"),
    ("SAN", "San Diego, CA, United States", "North America"),
    ("SCL", "Valparaíso, Chile", "Latin America & the Caribbean"),
    ("SEA", "Seattle, WA, United States", "North America"),
    ("SFO", "San Francisco, CA, United States", "North America"),
    ("SHE", "Shenyang, China", "Asia"),
    ("SIN", "Singapore, Singapore", "Asia"),
    ("SJC", "San Jose, CA, United States", "North America"),
    ("SJC-PIG", "San Jose (Alternate), CA, United States", "North America"),
    ("SJW", "Shijiazhuang, China", "Asia"),
    ("SLC", "Salt Lake City, UT, United States", "North America"),
    ("SOF", "Sofia, Bulgaria", "Europe"),
    ("STL", "St. Louis, MO, United States", "North America"),
    ("SYD", "Sydney, NSW, Australia", "Oceania"),
    ("SZV", "Suzhou, China", "Asia"),
    ("SZX", "Dongguan, China", "Asia"),
    ("TAO", "Qingdao, China", "Asia"),
    ("TNA", "Jinan, China", "Asia"),
    ("TPA", "Tampa, FL, United States", "North America"),
    ("TPE", "Taipei, Taiwan", "Asia"),
    ("TSN", "Tianjin, China", "Asia"),
    ("TXL", "Berlin, Germany", "Europe"),
    ("UIO", "Quito, Ecuador", "Latin America & the Caribbean"),
    ("VIE", "Vienna, Austria", "Europe"),
    ("WAW", "Warsaw, Poland", "Europe"),
    ("WUH", "Wuhan, China", "Asia"),
    ("WUX", "Wuxi, China", "Asia"),
    ("XIY", "Xi'an, China", "Asia"),
    ("YUL", "Montréal, QC, Canada", "North America"),
    ("YVR", "Vancouver, BC, Canada", "North America"),
    ("YYZ", "Toronto, ON, Canada", "North America"),
    ("ZAG", "Zagreb, Croatia", "Europe"),
    ("ZRH", "Zürich, Switzerland", "Europe"),
];
