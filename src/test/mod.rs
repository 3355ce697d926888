mod node_link;
mod shortest_path;
