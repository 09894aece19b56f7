use finder::Finder;
use finder::Items;

#[tokio::main]
async fn main() -> finder::Result<()> {
    let mut items = Items::new();
    items.add("apple", 0.5);
    items.add("banana", 0.25);
    items.add("cherry", 3.0);

    let mut finder = Finder::new(Vec::<String>::new())?;
    let prices = match finder.select_items(&items).await {
        Ok(prices) => prices,
        Err(error) if error.aborted() => return Ok(()),
        Err(error) => return Err(error),
    };

    let total: f64 = prices.iter().sum();
    println!("{} picked, {total:.2} total", prices.len());
    Ok(())
}
